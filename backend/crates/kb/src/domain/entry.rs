//! Knowledge base entry

use chrono::{DateTime, TimeZone, Utc};
use kernel::id::{KbEntryId, UserId};
use kernel::principal::Viewer;

use super::canonical_url::EntryUrl;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const TAG_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KbEntry {
    pub id: KbEntryId,
    pub user_id: UserId,
    pub title: String,
    pub url: EntryUrl,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KbEntry {
    pub fn new(user_id: UserId, draft: EntryDraft) -> Self {
        let now = now_millis();
        Self {
            id: KbEntryId::new(),
            user_id,
            title: draft.title,
            url: draft.url,
            tags: draft.tags,
            is_public: draft.is_public,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the user-editable fields
    pub fn apply(&mut self, draft: EntryDraft) {
        self.title = draft.title;
        self.url = draft.url;
        self.tags = draft.tags;
        self.is_public = draft.is_public;
        self.updated_at = now_millis();
    }

    pub fn is_visible_to(&self, viewer: &Viewer) -> bool {
        self.is_public
            || viewer
                .principal()
                .is_some_and(|p| p.can_manage(&self.user_id))
    }

    pub fn updated_at_ms(&self) -> i64 {
        self.updated_at.timestamp_millis()
    }
}

/// Validated user input for create / update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub url: EntryUrl,
    pub tags: Vec<String>,
    pub is_public: bool,
}

impl EntryDraft {
    pub fn new(
        title: &str,
        url: &str,
        tags: &[String],
        is_public: bool,
        max_tags: usize,
    ) -> Result<Self, String> {
        Ok(Self {
            title: validate_title(title)?,
            url: EntryUrl::parse(url)?,
            tags: normalize_tags(tags, max_tags)?,
            is_public,
        })
    }
}

fn validate_title(raw: &str) -> Result<String, String> {
    let title = raw.trim();
    let len = title.chars().count();
    if len == 0 {
        return Err("Tytuł jest wymagany".to_string());
    }
    if len > TITLE_MAX_LENGTH {
        return Err(format!(
            "Tytuł może mieć maksymalnie {TITLE_MAX_LENGTH} znaków"
        ));
    }
    Ok(title.to_string())
}

/// Trim, lower-case and de-duplicate, keeping first occurrence order
pub fn normalize_tags(raw: &[String], max_tags: usize) -> Result<Vec<String>, String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());

    for tag in raw {
        let tag = tag.trim().to_lowercase();
        let len = tag.chars().count();
        if len == 0 || len > TAG_MAX_LENGTH {
            return Err(format!("Tag musi mieć od 1 do {TAG_MAX_LENGTH} znaków"));
        }
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    if tags.len() > max_tags {
        return Err(format!("Można dodać maksymalnie {max_tags} tagów"));
    }

    Ok(tags)
}

/// Current time truncated to milliseconds, so cursors round-trip exactly
pub fn now_millis() -> DateTime<Utc> {
    let ms = Utc::now().timestamp_millis();
    Utc.timestamp_millis_opt(ms).single().unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::principal::{Principal, Role};

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_draft_validation() {
        let draft = EntryDraft::new(
            "  OWASP Testing Guide ",
            "https://owasp.org/www-project-web-security-testing-guide/",
            &tags(&["Security", " security", "web"]),
            true,
            10,
        )
        .unwrap();
        assert_eq!(draft.title, "OWASP Testing Guide");
        assert_eq!(draft.tags, vec!["security", "web"]);
        assert!(draft.url.canonical().ends_with("guide"));
    }

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"ą".repeat(200)).is_ok());
        assert!(validate_title(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_tag_rules() {
        assert!(normalize_tags(&tags(&[""]), 10).is_err());
        assert!(normalize_tags(&tags(&[&"x".repeat(33)]), 10).is_err());
        let eleven: Vec<String> = (0..11).map(|i| format!("t{i}")).collect();
        assert!(normalize_tags(&eleven, 10).is_err());
        // duplicates collapse before the count is checked
        let dupes: Vec<String> = (0..11).map(|_| "same".to_string()).collect();
        assert_eq!(normalize_tags(&dupes, 10).unwrap(), vec!["same"]);
    }

    #[test]
    fn test_visibility() {
        let owner = UserId::new();
        let draft = EntryDraft::new("t", "https://example.com", &[], false, 10).unwrap();
        let mut entry = KbEntry::new(owner, draft);

        let principal = |user_id, role| {
            Viewer::authenticated(Principal {
                user_id,
                email: "x@example.com".into(),
                role,
            })
        };

        assert!(!entry.is_visible_to(&Viewer::anonymous()));
        assert!(!entry.is_visible_to(&principal(UserId::new(), Role::User)));
        assert!(entry.is_visible_to(&principal(owner, Role::User)));
        assert!(entry.is_visible_to(&principal(UserId::new(), Role::Admin)));

        entry.is_public = true;
        assert!(entry.is_visible_to(&Viewer::anonymous()));
    }

    #[test]
    fn test_timestamps_have_millisecond_precision() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
