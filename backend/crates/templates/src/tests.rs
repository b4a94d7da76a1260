//! Handler tests for the Templates crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use kernel::id::{DefectTemplateId, UserId};
    use kernel::principal::{Principal, Role, Viewer};
    use tower::ServiceExt;

    use crate::domain::repository::TemplateRepository;
    use crate::domain::template::{DefectTemplate, FieldKind, TemplateDraft, TemplateField};
    use crate::error::TemplateResult;
    use crate::presentation::router::templates_router_generic;

    #[derive(Clone, Default)]
    pub struct MemoryTemplates {
        pub templates: Arc<Mutex<Vec<DefectTemplate>>>,
    }

    impl MemoryTemplates {
        /// Store pre-seeded with one global "Bug report" preset
        pub fn with_preset() -> (Self, DefectTemplateId) {
            let draft = TemplateDraft::new(
                "Bug report",
                vec![
                    TemplateField {
                        key: "title".into(),
                        label: "Tytuł".into(),
                        kind: FieldKind::Text,
                        required: true,
                        options: vec![],
                    },
                    TemplateField {
                        key: "severity".into(),
                        label: "Ważność".into(),
                        kind: FieldKind::Select,
                        required: true,
                        options: vec!["low".into(), "medium".into(), "high".into()],
                    },
                    TemplateField {
                        key: "steps".into(),
                        label: "Kroki".into(),
                        kind: FieldKind::Textarea,
                        required: false,
                        options: vec![],
                    },
                ],
                "## {{title}}\n**Severity:** {{severity}}\n\n{{steps}}",
            )
            .unwrap();
            let preset = DefectTemplate::new(None, draft);
            let id = preset.id;
            let store = Self::default();
            store.templates.lock().unwrap().push(preset);
            (store, id)
        }
    }

    impl TemplateRepository for MemoryTemplates {
        async fn list_visible(&self, owner: Option<&UserId>) -> TemplateResult<Vec<DefectTemplate>> {
            let mut items: Vec<DefectTemplate> = self
                .templates
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.owner_id.is_none() || t.owner_id.as_ref() == owner)
                .cloned()
                .collect();
            items.sort_by(|a, b| {
                (a.owner_id.is_some(), &a.name).cmp(&(b.owner_id.is_some(), &b.name))
            });
            Ok(items)
        }

        async fn find(&self, id: &DefectTemplateId) -> TemplateResult<Option<DefectTemplate>> {
            Ok(self
                .templates
                .lock()
                .unwrap()
                .iter()
                .find(|t| &t.id == id)
                .cloned())
        }

        async fn insert(&self, template: &DefectTemplate) -> TemplateResult<()> {
            self.templates.lock().unwrap().push(template.clone());
            Ok(())
        }

        async fn delete(&self, id: &DefectTemplateId) -> TemplateResult<bool> {
            let mut templates = self.templates.lock().unwrap();
            let before = templates.len();
            templates.retain(|t| &t.id != id);
            Ok(templates.len() < before)
        }
    }

    pub fn app(repo: MemoryTemplates) -> Router {
        templates_router_generic(repo)
    }

    pub fn viewer(role: Role) -> Viewer {
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
mod template_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use kernel::principal::{Role, Viewer};
    use serde_json::json;

    fn private_template() -> serde_json::Value {
        json!({
            "name": "UI glitch",
            "fields": [
                { "key": "screen", "label": "Ekran", "kind": "text", "required": true }
            ],
            "body": "Glitch on {{screen}}"
        })
    }

    #[tokio::test]
    async fn anonymous_sees_presets_only() {
        let (store, preset_id) = MemoryTemplates::with_preset();
        let app = app(store);
        let owner = viewer(Role::User);

        let (status, created) = call(&app, "POST", "/", &owner, Some(private_template())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["global"], false);

        let (_, list) = call(&app, "GET", "/", &Viewer::anonymous(), None).await;
        let items = list["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], preset_id.to_string());

        let (_, list) = call(&app, "GET", "/", &owner, None).await;
        let names: Vec<_> = list["items"].as_array().unwrap().iter().map(|t| t["name"].clone()).collect();
        assert_eq!(names, vec![json!("Bug report"), json!("UI glitch")]);

        let private_uri = format!("/{}", created["id"].as_str().unwrap());
        let (status, _) = call(&app, "GET", &private_uri, &viewer(Role::User), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, "GET", &private_uri, &owner, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn only_admins_create_global_templates() {
        let app = app(MemoryTemplates::default());
        let mut body = private_template();
        body["global"] = json!(true);

        let (status, err) = call(&app, "POST", "/", &viewer(Role::User), Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "FORBIDDEN_FIELD");

        let (status, created) = call(&app, "POST", "/", &viewer(Role::Admin), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["global"], true);
        assert!(created["ownerId"].is_null());
    }

    #[tokio::test]
    async fn invalid_definitions_are_rejected() {
        let app = app(MemoryTemplates::default());
        let user = viewer(Role::User);

        let cases = [
            json!({ "name": "x", "fields": [{ "key": "Bad Key", "label": "L", "kind": "text" }], "body": "b" }),
            json!({ "name": "x", "fields": [{ "key": "s", "label": "L", "kind": "select" }], "body": "{{s}}" }),
            json!({ "name": "x", "fields": [], "body": "{{undeclared}}" }),
            json!({ "name": "x", "fields": [
                { "key": "a", "label": "A", "kind": "text" },
                { "key": "a", "label": "B", "kind": "text" }
            ], "body": "{{a}}" }),
            json!({ "name": "x", "fields": [{ "key": "a", "label": "A", "kind": "date" }], "body": "{{a}}" }),
        ];

        for body in cases {
            let (status, err) = call(&app, "POST", "/", &user, Some(body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(err["error"]["code"], "VALIDATION_ERROR", "{body}");
        }

        let (status, _) = call(&app, "POST", "/", &Viewer::anonymous(), Some(private_template())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn render_fills_placeholders() {
        let (store, preset_id) = MemoryTemplates::with_preset();
        let app = app(store);
        let uri = format!("/{preset_id}/render");

        let (status, body) = call(
            &app,
            "POST",
            &uri,
            &Viewer::anonymous(),
            Some(json!({ "values": { "title": "Cart empties", "severity": "high", "unused": 1 } })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["markdown"], "## Cart empties\n**Severity:** high\n\n");
    }

    #[tokio::test]
    async fn render_rejects_missing_and_invalid_values() {
        let (store, preset_id) = MemoryTemplates::with_preset();
        let app = app(store);
        let uri = format!("/{preset_id}/render");
        let anon = Viewer::anonymous();

        let (status, body) = call(&app, "POST", &uri, &anon, Some(json!({ "values": { "severity": "low" } }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("title"));

        let (status, body) = call(
            &app,
            "POST",
            &uri,
            &anon,
            Some(json!({ "values": { "title": "x", "severity": "blocker" } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("severity"));
    }

    #[tokio::test]
    async fn delete_rights() {
        let (store, preset_id) = MemoryTemplates::with_preset();
        let app = app(store);
        let owner = viewer(Role::User);
        let admin = viewer(Role::Admin);

        let (_, created) = call(&app, "POST", "/", &owner, Some(private_template())).await;
        let private_uri = format!("/{}", created["id"].as_str().unwrap());
        let preset_uri = format!("/{preset_id}");

        let (status, _) = call(&app, "DELETE", &preset_uri, &owner, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, "DELETE", &private_uri, &admin, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, "DELETE", &private_uri, &owner, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, "DELETE", &preset_uri, &admin, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, list) = call(&app, "GET", "/", &owner, None).await;
        assert!(list["items"].as_array().unwrap().is_empty());
    }
}
