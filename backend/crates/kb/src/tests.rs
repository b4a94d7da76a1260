//! Handler tests for the KB crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use kernel::id::{KbEntryId, UserId};
    use kernel::principal::{Principal, Role, Viewer};
    use tower::ServiceExt;

    use crate::application::config::KbConfig;
    use crate::domain::entry::KbEntry;
    use crate::domain::repository::{EntryFilter, KbRepository};
    use crate::error::{KbError, KbResult};
    use crate::presentation::router::kb_router_generic;

    #[derive(Clone, Default)]
    pub struct MemoryKb {
        pub entries: Arc<Mutex<Vec<KbEntry>>>,
    }

    impl MemoryKb {
        fn duplicate(&self, entry: &KbEntry) -> bool {
            self.entries.lock().unwrap().iter().any(|e| {
                e.id != entry.id
                    && e.user_id == entry.user_id
                    && e.url.canonical() == entry.url.canonical()
            })
        }
    }

    impl KbRepository for MemoryKb {
        async fn list(&self, filter: &EntryFilter) -> KbResult<Vec<KbEntry>> {
            let mut items: Vec<KbEntry> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.is_public || Some(e.user_id) == filter.viewer)
                .filter(|e| {
                    filter
                        .after
                        .is_none_or(|c| c.precedes(e.updated_at_ms(), &e.id))
                })
                .filter(|e| {
                    filter.query.as_ref().is_none_or(|q| {
                        let q = q.to_lowercase();
                        e.title.to_lowercase().contains(&q)
                            || e.url.original().to_lowercase().contains(&q)
                    })
                })
                .filter(|e| filter.tag.as_ref().is_none_or(|t| e.tags.contains(t)))
                .cloned()
                .collect();
            items.sort_by(|a, b| {
                (b.updated_at_ms(), b.id.as_uuid()).cmp(&(a.updated_at_ms(), a.id.as_uuid()))
            });
            items.truncate(filter.limit);
            Ok(items)
        }

        async fn find(&self, id: &KbEntryId) -> KbResult<Option<KbEntry>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .find(|e| &e.id == id)
                .cloned())
        }

        async fn insert(&self, entry: &KbEntry) -> KbResult<()> {
            if self.duplicate(entry) {
                return Err(KbError::DuplicateUrl);
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn update(&self, entry: &KbEntry) -> KbResult<()> {
            if self.duplicate(entry) {
                return Err(KbError::DuplicateUrl);
            }
            let mut entries = self.entries.lock().unwrap();
            let slot = entries
                .iter_mut()
                .find(|e| e.id == entry.id)
                .ok_or(KbError::NotFound)?;
            *slot = entry.clone();
            Ok(())
        }

        async fn delete(&self, id: &KbEntryId) -> KbResult<bool> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| &e.id != id);
            Ok(entries.len() < before)
        }
    }

    pub fn app(repo: MemoryKb) -> Router {
        kb_router_generic(repo, KbConfig::development())
    }

    pub fn user(role: Role) -> Viewer {
        Viewer::authenticated(Principal {
            user_id: UserId::new(),
            email: "tester@example.com".to_string(),
            role,
        })
    }

    pub async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        viewer: &Viewer,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let mut req = builder.body(body).unwrap();
        req.extensions_mut().insert(viewer.clone());

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

#[cfg(test)]
mod entry_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use kernel::principal::{Role, Viewer};
    use serde_json::json;

    fn body(title: &str, url: &str) -> serde_json::Value {
        json!({ "title": title, "url": url, "tags": ["API", "api", "rest"] })
    }

    #[tokio::test]
    async fn create_and_read_back() {
        let app = app(MemoryKb::default());
        let alice = user(Role::User);

        let (status, created) = call(
            &app,
            "POST",
            "/entries",
            &alice,
            Some(body("REST testing", "https://Example.com/guide/?utm_source=x#intro")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "REST testing");
        assert_eq!(created["urlCanonical"], "https://example.com/guide");
        assert_eq!(created["tags"], json!(["api", "rest"]));
        assert_eq!(created["isPublic"], false);
        assert_eq!(created["userId"], alice.user_id().unwrap().to_string());

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = call(&app, "GET", &format!("/entries/{id}"), &alice, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], created["id"]);
    }

    #[tokio::test]
    async fn anonymous_create_is_unauthenticated() {
        let app = app(MemoryKb::default());
        let (status, body) = call(
            &app,
            "POST",
            "/entries",
            &Viewer::anonymous(),
            Some(body("x", "https://example.com")),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn forbidden_fields_are_named() {
        let app = app(MemoryKb::default());
        let alice = user(Role::User);

        for field in ["id", "userId", "user_id", "createdAt", "updated_at", "urlCanonical"] {
            let mut payload = body("x", "https://example.com");
            payload[field] = json!("sneaky");
            let (status, body) = call(&app, "POST", "/entries", &alice, Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
            assert_eq!(body["error"]["code"], "FORBIDDEN_FIELD", "{field}");
            assert!(body["error"]["message"].as_str().unwrap().contains(field));
        }
    }

    #[tokio::test]
    async fn unknown_fields_and_bad_values_are_validation_errors() {
        let app = app(MemoryKb::default());
        let alice = user(Role::User);

        let mut payload = body("x", "https://example.com");
        payload["color"] = json!("red");
        let cases = [
            payload,
            body("", "https://example.com"),
            body("x", "ftp://example.com"),
            json!({ "title": "x" }),
            json!(["not", "an", "object"]),
        ];

        for payload in cases {
            let (status, body) = call(&app, "POST", "/entries", &alice, Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn duplicate_canonical_url_conflicts_per_user() {
        let app = app(MemoryKb::default());
        let alice = user(Role::User);
        let bob = user(Role::User);

        let (status, _) = call(&app, "POST", "/entries", &alice, Some(body("a", "https://example.com/x"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body_json) = call(
            &app,
            "POST",
            "/entries",
            &alice,
            Some(body("b", "HTTPS://EXAMPLE.COM/x/?fbclid=1")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body_json["error"]["code"], "CONFLICT");

        // Another user may bookmark the same page
        let (status, _) = call(&app, "POST", "/entries", &bob, Some(body("c", "https://example.com/x"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn private_entries_of_others_are_invisible() {
        let app = app(MemoryKb::default());
        let alice = user(Role::User);
        let bob = user(Role::User);
        let admin = user(Role::Admin);

        let (_, private) = call(&app, "POST", "/entries", &alice, Some(body("private", "https://a.example"))).await;
        let mut public = body("public", "https://b.example");
        public["isPublic"] = json!(true);
        let (_, public) = call(&app, "POST", "/entries", &alice, Some(public)).await;

        let (_, list) = call(&app, "GET", "/entries", &bob, None).await;
        let titles: Vec<_> = list["items"].as_array().unwrap().iter().map(|e| e["title"].clone()).collect();
        assert_eq!(titles, vec![json!("public")]);

        let (_, list) = call(&app, "GET", "/entries", &Viewer::anonymous(), None).await;
        assert_eq!(list["items"].as_array().unwrap().len(), 1);

        let (_, list) = call(&app, "GET", "/entries", &alice, None).await;
        assert_eq!(list["items"].as_array().unwrap().len(), 2);

        let private_uri = format!("/entries/{}", private["id"].as_str().unwrap());
        let (status, body_json) = call(&app, "GET", &private_uri, &bob, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body_json["error"]["code"], "NOT_FOUND");

        let (status, _) = call(&app, "GET", &private_uri, &admin, None).await;
        assert_eq!(status, StatusCode::OK);

        let public_uri = format!("/entries/{}", public["id"].as_str().unwrap());
        let (status, _) = call(&app, "GET", &public_uri, &Viewer::anonymous(), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn only_owner_or_admin_may_modify() {
        let app = app(MemoryKb::default());
        let alice = user(Role::User);
        let bob = user(Role::User);
        let admin = user(Role::Admin);

        let mut payload = body("shared", "https://example.com/shared");
        payload["isPublic"] = json!(true);
        let (_, created) = call(&app, "POST", "/entries", &alice, Some(payload)).await;
        let uri = format!("/entries/{}", created["id"].as_str().unwrap());

        let (status, _) = call(&app, "PUT", &uri, &bob, Some(body("mine now", "https://example.com/shared"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, "DELETE", &uri, &bob, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, updated) = call(&app, "PUT", &uri, &alice, Some(body("renamed", "https://example.com/shared"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "renamed");
        // Omitted isPublic resets to private
        assert_eq!(updated["isPublic"], false);

        let (status, body_json) = call(&app, "DELETE", &uri, &admin, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body_json, serde_json::Value::Null);

        let (status, _) = call(&app, "GET", &uri, &alice, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_path_id_is_validation_error() {
        let app = app(MemoryKb::default());
        let (status, body) = call(&app, "GET", "/entries/not-a-uuid", &Viewer::anonymous(), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

#[cfg(test)]
mod list_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use chrono::Duration;
    use kernel::principal::Role;
    use serde_json::json;

    use crate::domain::entry::{EntryDraft, KbEntry, now_millis};

    fn seed(repo: &MemoryKb, owner: kernel::id::UserId, count: i64) {
        let base = now_millis();
        let mut entries = repo.entries.lock().unwrap();
        for i in 0..count {
            let draft = EntryDraft::new(
                &format!("Entry {i}"),
                &format!("https://example.com/{i}"),
                &[if i % 2 == 0 { "even" } else { "odd" }.to_string()],
                true,
                10,
            )
            .unwrap();
            let mut entry = KbEntry::new(owner, draft);
            // Two entries share each timestamp to exercise the id tie-break
            entry.updated_at = base - Duration::milliseconds(i / 2);
            entries.push(entry);
        }
    }

    #[tokio::test]
    async fn pages_cover_every_entry_exactly_once() {
        let repo = MemoryKb::default();
        let alice = user(Role::User);
        seed(&repo, alice.user_id().unwrap(), 25);
        let app = app(repo);

        let mut seen = Vec::new();
        let mut uri = "/entries?limit=10".to_string();
        let mut pages = 0;
        loop {
            let (status, page) = call(&app, "GET", &uri, &alice, None).await;
            assert_eq!(status, StatusCode::OK);
            pages += 1;
            for item in page["items"].as_array().unwrap() {
                seen.push(item["id"].as_str().unwrap().to_string());
            }
            match page["nextCursor"].as_str() {
                Some(cursor) => uri = format!("/entries?limit=10&after={cursor}"),
                None => break,
            }
        }

        assert_eq!(pages, 3);
        assert_eq!(seen.len(), 25);
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 25);
    }

    #[tokio::test]
    async fn default_limit_and_filters() {
        let repo = MemoryKb::default();
        let alice = user(Role::User);
        seed(&repo, alice.user_id().unwrap(), 30);
        let app = app(repo);

        let (_, page) = call(&app, "GET", "/entries", &alice, None).await;
        assert_eq!(page["items"].as_array().unwrap().len(), 20);
        assert!(page["nextCursor"].is_string());

        let (_, page) = call(&app, "GET", "/entries?tag=ODD&limit=100", &alice, None).await;
        assert_eq!(page["items"].as_array().unwrap().len(), 15);
        assert!(page["nextCursor"].is_null());

        let (_, page) = call(&app, "GET", "/entries?q=entry%2012", &alice, None).await;
        let items = page["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], json!("Entry 12"));
    }

    #[tokio::test]
    async fn bad_limit_or_cursor_is_rejected() {
        let app = app(MemoryKb::default());
        let alice = user(Role::User);

        for uri in [
            "/entries?limit=0",
            "/entries?limit=101",
            "/entries?limit=abc",
            "/entries?after=%%%",
            "/entries?after=bm9wZQ",
        ] {
            let (status, body) = call(&app, "GET", uri, &alice, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;

    use crate::error::KbError;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (KbError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (KbError::ForbiddenField("id".into()), StatusCode::BAD_REQUEST),
            (KbError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (KbError::NotFound, StatusCode::NOT_FOUND),
            (KbError::DuplicateUrl, StatusCode::CONFLICT),
            (KbError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }
}
