//! Minimal OpenAPI 3.0 document model.
//!
//! API modules contribute their paths and component schemas as plain JSON
//! values; the gateway only assembles and serves the final document.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct OpenApi {
    pub openapi: &'static str,
    pub info: OpenApiInfo,
    pub paths: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<OpenApiComponents>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenApiInfo {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenApiComponents {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Value>,
}

impl OpenApi {
    /// Assemble a document from module-contributed paths and schemas.
    pub fn new(info: OpenApiInfo, paths: Value, schemas: BTreeMap<String, Value>) -> Self {
        let components = if schemas.is_empty() {
            None
        } else {
            Some(OpenApiComponents { schemas })
        };
        Self {
            openapi: "3.0.3",
            info,
            paths,
            components,
        }
    }
}
