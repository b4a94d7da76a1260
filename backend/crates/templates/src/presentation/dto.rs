//! Template DTOs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::CreateTemplateInput;
use crate::domain::template::{DefectTemplate, TemplateField};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTemplateRequest {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<TemplateField>,
    pub body: String,
    #[serde(default)]
    pub global: bool,
}

impl From<CreateTemplateRequest> for CreateTemplateInput {
    fn from(req: CreateTemplateRequest) -> Self {
        Self {
            name: req.name,
            fields: req.fields,
            body: req.body,
            global: req.global,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub values: HashMap<String, Value>,
}

impl RenderRequest {
    /// Scalars become strings; `null`, arrays and objects count as missing
    pub fn string_values(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub global: bool,
    pub owner_id: Option<String>,
    pub fields: Vec<TemplateField>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DefectTemplate> for TemplateResponse {
    fn from(t: &DefectTemplate) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name.clone(),
            global: t.is_global(),
            owner_id: t.owner_id.map(|id| id.to_string()),
            fields: t.fields.clone(),
            body: t.body.clone(),
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListTemplatesResponse {
    pub items: Vec<TemplateResponse>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub markdown: String,
}
