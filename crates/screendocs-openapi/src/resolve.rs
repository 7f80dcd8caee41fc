//! Endpoint resolution.
//!
//! Turns an endpoint declaration into a flat [`ResolvedEndpoint`] with every
//! optional field defaulted, so the renderer never deals with references or
//! missing values.

use screendocs_config::EndpointDecl;

use crate::document::{OpenApiDocument, Operation, Schema};
use crate::loader::SpecCollection;

/// Media type whose request body properties are documented.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Normalized details of one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Method as declared in the mapping.
    pub method: String,
    /// Path as declared in the mapping.
    pub path: String,
    /// One-line summary, empty if absent.
    pub summary: String,
    /// Long description, empty if absent.
    pub description: String,
    /// Operation parameters in spec order.
    pub parameters: Vec<Field>,
    /// JSON request body, present only for `application/json` bodies with a schema.
    pub request_body: Option<JsonBody>,
    /// Responses in spec order.
    pub responses: Vec<ResponseSummary>,
    /// Operation tags.
    pub tags: Vec<String>,
}

/// A documented parameter or body property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub required: bool,
    /// Description, empty if absent.
    pub description: String,
    /// Schema type name, empty if absent.
    pub schema_type: String,
}

impl Field {
    /// Description, falling back to the type name.
    pub fn description_or_type(&self) -> &str {
        if self.description.is_empty() {
            &self.schema_type
        } else {
            &self.description
        }
    }
}

/// Top-level properties of a JSON request body schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonBody {
    pub properties: Vec<Field>,
}

/// Status code with its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub code: String,
    pub description: String,
}

impl SpecCollection {
    /// Resolve an endpoint declaration against the loaded specs.
    ///
    /// Returns `None` if the source spec was not loaded, the path is not in
    /// it, or the path has no operation for the method.
    pub fn resolve(&self, decl: &EndpointDecl) -> Option<ResolvedEndpoint> {
        let document = self.get(&decl.source)?;
        let operation = document.operation(&decl.path, &decl.method)?;
        Some(normalize(document, operation, decl))
    }
}

fn normalize(doc: &OpenApiDocument, op: &Operation, decl: &EndpointDecl) -> ResolvedEndpoint {
    let components = &doc.components;

    let parameters = op
        .parameters
        .iter()
        .map(|param| {
            let param = components.parameter(param).unwrap_or(param);
            Field {
                name: param.name.clone(),
                required: param.required,
                description: param.description.clone().unwrap_or_default(),
                schema_type: param
                    .schema
                    .as_ref()
                    .map(|schema| type_name(doc, schema))
                    .unwrap_or_default(),
            }
        })
        .collect();

    let request_body = op.request_body.as_ref().and_then(|body| {
        let body = components.request_body(body)?;
        let schema = body.content.get(JSON_CONTENT_TYPE)?.schema.as_ref()?;
        let schema = components.schema(schema).unwrap_or(schema);
        Some(json_body(doc, schema))
    });

    let responses = op
        .responses
        .iter()
        .map(|(code, response)| ResponseSummary {
            code: code.clone(),
            description: components
                .response(response)
                .and_then(|r| r.description.clone())
                .unwrap_or_default(),
        })
        .collect();

    ResolvedEndpoint {
        method: decl.method.clone(),
        path: decl.path.clone(),
        summary: op.summary.clone().unwrap_or_default(),
        description: op.description.clone().unwrap_or_default(),
        parameters,
        request_body,
        responses,
        tags: op.tags.clone(),
    }
}

fn json_body(doc: &OpenApiDocument, schema: &Schema) -> JsonBody {
    let properties = schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let resolved = doc.components.schema(prop).unwrap_or(prop);
            Field {
                name: name.clone(),
                required: schema.required.contains(name),
                description: prop
                    .description
                    .clone()
                    .or_else(|| resolved.description.clone())
                    .unwrap_or_default(),
                schema_type: type_name(doc, prop),
            }
        })
        .collect();
    JsonBody { properties }
}

/// Type name of a schema, following a reference if needed.
fn type_name(doc: &OpenApiDocument, schema: &Schema) -> String {
    doc.components
        .schema(schema)
        .unwrap_or(schema)
        .schema_type
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use screendocs_config::EndpointStatus;

    use super::*;

    const SPEC: &str = r##"
paths:
  /login:
    post:
      summary: Authenticate user
      description: Checks credentials.
      tags: [auth, session]
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [email, password]
              properties:
                email:
                  type: string
                  description: Account email
                password:
                  type: string
                remember:
                  $ref: '#/components/schemas/Flag'
      responses:
        '200':
          description: Logged in
        '401':
          $ref: '#/components/responses/Unauthorized'
  /avatar:
    put:
      requestBody:
        content:
          image/png:
            schema:
              type: string
      responses: {}
  /bare:
    get: {}
  /items:
    get:
      parameters:
        - $ref: '#/components/parameters/Page'
        - name: q
          in: query
        - $ref: '#/components/parameters/Gone'
components:
  parameters:
    Page:
      name: page
      in: query
      schema:
        type: integer
  responses:
    Unauthorized:
      description: Bad credentials
  schemas:
    Flag:
      type: boolean
      description: Keep the session
"##;

    fn specs() -> SpecCollection {
        let mut specs = SpecCollection::default();
        specs.insert("api/openapi.yaml", OpenApiDocument::from_yaml(SPEC).unwrap());
        specs
    }

    fn decl(source: &str, path: &str, method: &str) -> EndpointDecl {
        EndpointDecl {
            source: source.to_owned(),
            path: path.to_owned(),
            method: method.to_owned(),
            status: EndpointStatus::Deployed,
        }
    }

    #[test]
    fn test_resolve_full_operation() {
        let endpoint = specs()
            .resolve(&decl("api/openapi.yaml", "/login", "POST"))
            .unwrap();

        assert_eq!(endpoint.method, "POST");
        assert_eq!(endpoint.path, "/login");
        assert_eq!(endpoint.summary, "Authenticate user");
        assert_eq!(endpoint.description, "Checks credentials.");
        assert_eq!(endpoint.tags, vec!["auth".to_owned(), "session".to_owned()]);
        assert_eq!(
            endpoint.responses,
            vec![
                ResponseSummary {
                    code: "200".to_owned(),
                    description: "Logged in".to_owned(),
                },
                ResponseSummary {
                    code: "401".to_owned(),
                    description: "Bad credentials".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_request_body_required_markers() {
        let endpoint = specs()
            .resolve(&decl("api/openapi.yaml", "/login", "post"))
            .unwrap();
        let body = endpoint.request_body.unwrap();
        let summary: Vec<_> = body
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.required, p.description_or_type()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("email", true, "Account email"),
                ("password", true, "string"),
                ("remember", false, "Keep the session"),
            ]
        );
    }

    #[test]
    fn test_non_json_body_is_omitted() {
        let endpoint = specs()
            .resolve(&decl("api/openapi.yaml", "/avatar", "PUT"))
            .unwrap();
        assert!(endpoint.request_body.is_none());
        assert!(endpoint.responses.is_empty());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let endpoint = specs()
            .resolve(&decl("api/openapi.yaml", "/bare", "GET"))
            .unwrap();
        assert_eq!(endpoint.summary, "");
        assert_eq!(endpoint.description, "");
        assert!(endpoint.parameters.is_empty());
        assert!(endpoint.request_body.is_none());
        assert!(endpoint.responses.is_empty());
        assert!(endpoint.tags.is_empty());
    }

    #[test]
    fn test_parameter_references() {
        let endpoint = specs()
            .resolve(&decl("api/openapi.yaml", "/items", "GET"))
            .unwrap();
        let names: Vec<_> = endpoint
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.description_or_type()))
            .collect();
        assert_eq!(names, vec![("page", "integer"), ("q", ""), ("", "")]);
    }

    #[test]
    fn test_not_found_cases() {
        let specs = specs();
        assert!(
            specs
                .resolve(&decl("steam/openapi.yaml", "/login", "POST"))
                .is_none()
        );
        assert!(
            specs
                .resolve(&decl("api/openapi.yaml", "/logout", "POST"))
                .is_none()
        );
        assert!(
            specs
                .resolve(&decl("api/openapi.yaml", "/login", "DELETE"))
                .is_none()
        );
    }

    #[test]
    fn test_boolean_property_schema_renders_empty_field() {
        let mut specs = SpecCollection::default();
        specs.insert(
            "api/openapi.yaml",
            OpenApiDocument::from_yaml(
                r"
paths:
  /profile:
    put:
      requestBody:
        content:
          application/json:
            schema:
              required: [meta]
              properties:
                meta: true
",
            )
            .unwrap(),
        );
        let endpoint = specs
            .resolve(&decl("api/openapi.yaml", "/profile", "PUT"))
            .unwrap();
        assert_eq!(
            endpoint.request_body.unwrap().properties,
            vec![Field {
                name: "meta".to_owned(),
                required: true,
                description: String::new(),
                schema_type: String::new(),
            }]
        );
    }
}
