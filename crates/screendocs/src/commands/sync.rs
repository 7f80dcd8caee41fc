//! `screendocs sync` command implementation.

use std::time::Duration;

use clap::Args;
use screendocs_config::{Config, Mapping, NotionCredentials};
use screendocs_notion::{NotionClient, PageSyncer, ScreenPlan, ScreenReport, SyncConfig, SyncEvent};
use screendocs_openapi::SpecCollection;

use super::{SourceArgs, load_inputs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sync command.
#[derive(Args)]
pub(crate) struct SyncArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Render every screen without contacting Notion.
    #[arg(long)]
    dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, inputs cannot be read, or
    /// any Notion call fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;

        // Credentials are checked before any input is read
        let credentials = if self.dry_run {
            None
        } else {
            Some(config.require_notion()?)
        };

        output.info("Loading mapping and specs...");
        let (mapping, specs) = load_inputs(&config)?;
        output.info(&format!("Loaded {} spec files", specs.len()));
        output.info(&format!("Found {} screen mappings", mapping.screens.len()));

        let sync_config =
            SyncConfig::new(config.page.clone()).source_name(config.mapping_file_name());

        match credentials {
            Some(credentials) => sync(&output, &credentials, sync_config, &mapping, &specs),
            None => {
                dry_run(&output, &config, &sync_config, &mapping, &specs);
                Ok(())
            }
        }
    }
}

fn sync(
    output: &Output,
    credentials: &NotionCredentials,
    sync_config: SyncConfig,
    mapping: &Mapping,
    specs: &SpecCollection,
) -> Result<(), CliError> {
    let client = NotionClient::new(
        &credentials.base_url,
        &credentials.api_key,
        &credentials.version,
        Duration::from_secs(credentials.timeout),
    );
    let syncer = PageSyncer::new(&client, &credentials.database_id, sync_config);

    let reports = syncer.sync_all(mapping, specs, |event| match event {
        SyncEvent::ScreenStarted { screen } => output.screen(&format!("\nSyncing: {screen}")),
        SyncEvent::CreatingPage { .. } => output.step("Creating new page..."),
        SyncEvent::UpdatingContent { .. } => output.step("Updating content..."),
        SyncEvent::ScreenFinished(report) => print_screen_report(output, report),
    })?;

    output.success("\nNotion sync complete!");
    let created = reports.iter().filter(|r| r.created).count();
    output.info(&format!(
        "Screens synced: {} ({created} page(s) created)",
        reports.len()
    ));
    Ok(())
}

fn print_screen_report(output: &Output, report: &ScreenReport) {
    let content = &report.content;
    output.detail(&format!(
        "{} blocks in {} batch(es), {} old block(s) removed",
        content.blocks, content.batches, content.cleared.deleted
    ));
    if content.cleared.failed > 0 {
        output.warning(&format!(
            "  Warning: {} old block(s) could not be deleted",
            content.cleared.failed
        ));
    }
    output.step("Done!");
}

fn dry_run(
    output: &Output,
    config: &Config,
    sync_config: &SyncConfig,
    mapping: &Mapping,
    specs: &SpecCollection,
) {
    for (name, screen) in &mapping.screens {
        output.screen(&format!("\nSyncing: {name}"));
        let plan = ScreenPlan::build(sync_config, name, screen, specs);
        output.detail(&format!(
            "Would write {} blocks in {} batch(es) to \"{}\"",
            plan.blocks.len(),
            plan.batches(),
            config.page.title_for(name)
        ));
    }

    output.warning("\n[DRY RUN] No changes made.");
}
