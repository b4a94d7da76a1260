//! Defect template entity

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use kernel::id::{DefectTemplateId, UserId};
use kernel::principal::{Principal, Viewer};
use serde::{Deserialize, Serialize};

use super::render::placeholders;

pub const NAME_MAX_LENGTH: usize = 100;
pub const LABEL_MAX_LENGTH: usize = 100;
pub const KEY_MAX_LENGTH: usize = 32;
pub const BODY_MAX_LENGTH: usize = 10_000;
pub const MAX_FIELDS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// `[a-z0-9_]{1,32}`
pub fn is_valid_key(key: &str) -> bool {
    (1..=KEY_MAX_LENGTH).contains(&key.len())
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefectTemplate {
    pub id: DefectTemplateId,
    /// `None` for global presets
    pub owner_id: Option<UserId>,
    pub name: String,
    pub fields: Vec<TemplateField>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DefectTemplate {
    pub fn new(owner_id: Option<UserId>, draft: TemplateDraft) -> Self {
        let now = Utc::now();
        Self {
            id: DefectTemplateId::new(),
            owner_id,
            name: draft.name,
            fields: draft.fields,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_global(&self) -> bool {
        self.owner_id.is_none()
    }

    pub fn is_visible_to(&self, viewer: &Viewer) -> bool {
        self.is_global() || (self.owner_id.is_some() && self.owner_id == viewer.user_id())
    }

    /// Owners delete their own; admins may also delete presets
    pub fn can_delete(&self, principal: &Principal) -> bool {
        match self.owner_id {
            Some(owner) => owner == principal.user_id,
            None => principal.role.is_admin(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Validated name, fields and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub fields: Vec<TemplateField>,
    pub body: String,
}

impl TemplateDraft {
    pub fn new(name: &str, fields: Vec<TemplateField>, body: &str) -> Result<Self, String> {
        let name = name.trim();
        let name_len = name.chars().count();
        if name_len == 0 || name_len > NAME_MAX_LENGTH {
            return Err(format!(
                "Nazwa szablonu musi mieć od 1 do {NAME_MAX_LENGTH} znaków"
            ));
        }

        if fields.len() > MAX_FIELDS {
            return Err(format!("Szablon może mieć maksymalnie {MAX_FIELDS} pól"));
        }

        let fields = fields
            .into_iter()
            .map(validate_field)
            .collect::<Result<Vec<_>, _>>()?;

        let mut keys = HashSet::new();
        for field in &fields {
            if !keys.insert(field.key.as_str()) {
                return Err(format!("Klucz pola `{}` występuje więcej niż raz", field.key));
            }
        }

        let body_len = body.chars().count();
        if body.trim().is_empty() || body_len > BODY_MAX_LENGTH {
            return Err(format!(
                "Treść szablonu musi mieć od 1 do {BODY_MAX_LENGTH} znaków"
            ));
        }

        if let Some(unknown) = placeholders(body).into_iter().find(|k| !keys.contains(k)) {
            return Err(format!(
                "Treść odwołuje się do niezadeklarowanego pola `{unknown}`"
            ));
        }

        Ok(Self {
            name: name.to_string(),
            fields,
            body: body.to_string(),
        })
    }
}

fn validate_field(mut field: TemplateField) -> Result<TemplateField, String> {
    if !is_valid_key(&field.key) {
        return Err(format!(
            "Klucz pola `{}` może zawierać tylko małe litery, cyfry i _ (1-{KEY_MAX_LENGTH} znaków)",
            field.key
        ));
    }

    field.label = field.label.trim().to_string();
    let label_len = field.label.chars().count();
    if label_len == 0 || label_len > LABEL_MAX_LENGTH {
        return Err(format!(
            "Etykieta pola `{}` musi mieć od 1 do {LABEL_MAX_LENGTH} znaków",
            field.key
        ));
    }

    match field.kind {
        FieldKind::Select => {
            field.options = field
                .options
                .iter()
                .map(|o| o.trim().to_string())
                .collect();
            if field.options.is_empty() || field.options.iter().any(String::is_empty) {
                return Err(format!(
                    "Pole wyboru `{}` wymaga niepustej listy opcji",
                    field.key
                ));
            }
            let unique: HashSet<&String> = field.options.iter().collect();
            if unique.len() != field.options.len() {
                return Err(format!("Opcje pola `{}` muszą być unikalne", field.key));
            }
        }
        FieldKind::Text | FieldKind::Textarea => field.options.clear(),
    }

    Ok(field)
}
