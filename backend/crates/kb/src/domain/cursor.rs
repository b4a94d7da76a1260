//! Keyset pagination cursor
//!
//! Encoded as URL-safe base64 (no padding) of `"<updated_at_ms>:<id>"`.
//! Entries are ordered `updated_at DESC, id DESC`; the cursor names the last
//! entry of the previous page.

use kernel::id::KbEntryId;
use platform::crypto::{from_base64_url, to_base64_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub updated_at_ms: i64,
    pub id: KbEntryId,
}

impl Cursor {
    pub fn new(updated_at_ms: i64, id: KbEntryId) -> Self {
        Self { updated_at_ms, id }
    }

    pub fn encode(&self) -> String {
        to_base64_url(format!("{}:{}", self.updated_at_ms, self.id).as_bytes())
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = from_base64_url(raw).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (ms, id) = text.split_once(':')?;
        Some(Self {
            updated_at_ms: ms.parse().ok()?,
            id: id.parse().ok()?,
        })
    }

    /// Strictly after this cursor in `(updated_at DESC, id DESC)` order
    pub fn precedes(&self, updated_at_ms: i64, id: &KbEntryId) -> bool {
        (updated_at_ms, id.as_uuid()) < (self.updated_at_ms, self.id.as_uuid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_decode_of_encoded() {
        let cursor = Cursor::new(1_700_000_000_123, KbEntryId::new());
        let encoded = cursor.encode();
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+') && !encoded.contains('/'));
        assert_eq!(Cursor::decode(&encoded), Some(cursor));
    }

    #[test]
    fn test_cursor_rejects_garbage() {
        assert_eq!(Cursor::decode(""), None);
        assert_eq!(Cursor::decode("not base64!"), None);
        assert_eq!(Cursor::decode(&to_base64_url(b"123")), None);
        assert_eq!(Cursor::decode(&to_base64_url(b"abc:def")), None);
        assert_eq!(
            Cursor::decode(&to_base64_url(b"12:00000000-0000-0000-0000-zzzzzzzzzzzz")),
            None
        );
    }

    #[test]
    fn test_precedes_orders_by_time_then_id() {
        let id = KbEntryId::new();
        let cursor = Cursor::new(1000, id);
        assert!(cursor.precedes(999, &KbEntryId::new()));
        assert!(!cursor.precedes(1001, &KbEntryId::new()));
        assert!(!cursor.precedes(1000, &id));
    }
}
