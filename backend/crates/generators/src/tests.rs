//! Unit and handler tests for the Generators crate

#[cfg(test)]
mod support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{HeaderMap, Request, StatusCode};
    use tower::ServiceExt;

    use crate::application::config::GeneratorConfig;
    use crate::presentation::router::generators_router;

    pub fn app() -> Router {
        generators_router(GeneratorConfig::development())
    }

    pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, bytes.to_vec())
    }

    pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, _, bytes) = get(app, uri).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

#[cfg(test)]
mod generate_tests {
    use std::sync::Arc;

    use crate::application::config::GeneratorConfig;
    use crate::application::{GenerateIbanInput, GenerateIbanUseCase};
    use crate::domain::country::Country;
    use crate::domain::iban::Iban;
    use crate::error::GeneratorError;

    fn use_case() -> GenerateIbanUseCase {
        GenerateIbanUseCase::new(Arc::new(GeneratorConfig::default()))
    }

    fn input(country: Option<&str>, seed: Option<&str>) -> GenerateIbanInput {
        GenerateIbanInput {
            country: country.map(str::to_string),
            seed: seed.map(str::to_string),
        }
    }

    #[test]
    fn generated_ibans_always_validate() {
        for country in Country::ALL {
            for _ in 0..200 {
                let generated = use_case()
                    .execute(input(Some(country.code()), None))
                    .unwrap();
                let parsed = Iban::parse(generated.iban.as_str()).unwrap();
                assert_eq!(parsed.country_code(), country.code());
                assert_eq!(parsed.as_str().len(), country.iban_length());
            }
        }
    }

    #[test]
    fn seeded_generation_is_stable() {
        for country in Country::ALL {
            let a = use_case()
                .execute(input(Some(country.code()), Some("release-1.0")))
                .unwrap();
            let b = use_case()
                .execute(input(Some(country.code()), Some("release-1.0")))
                .unwrap();
            assert_eq!(a.iban, b.iban);
            assert_eq!(a.seed.as_ref().map(|s| s.as_str()), Some("release-1.0"));
        }
    }

    #[test]
    fn different_seeds_give_different_ibans() {
        let a = use_case().execute(input(Some("PL"), Some("a"))).unwrap();
        let b = use_case().execute(input(Some("PL"), Some("b"))).unwrap();
        assert_ne!(a.iban, b.iban);
    }

    #[test]
    fn country_defaults_to_de_and_is_case_insensitive() {
        let generated = use_case().execute(input(None, None)).unwrap();
        assert_eq!(generated.country, Country::De);

        let generated = use_case().execute(input(Some(""), None)).unwrap();
        assert_eq!(generated.country, Country::De);

        let generated = use_case().execute(input(Some("at"), None)).unwrap();
        assert_eq!(generated.country, Country::At);
    }

    #[test]
    fn empty_seed_is_treated_as_absent() {
        let generated = use_case().execute(input(Some("DE"), Some(""))).unwrap();
        assert!(generated.seed.is_none());
    }

    #[test]
    fn rejects_unknown_country_and_bad_seed() {
        assert!(matches!(
            use_case().execute(input(Some("FR"), None)),
            Err(GeneratorError::Validation(_))
        ));
        assert!(matches!(
            use_case().execute(input(Some("DE"), Some("bad seed!"))),
            Err(GeneratorError::Validation(_))
        ));
        let long = "s".repeat(65);
        assert!(matches!(
            use_case().execute(input(Some("DE"), Some(&long))),
            Err(GeneratorError::Validation(_))
        ));
    }

    #[test]
    fn disabled_country_is_rejected() {
        let config = GeneratorConfig {
            enabled_countries: vec![Country::Pl],
            ..GeneratorConfig::default()
        };
        let use_case = GenerateIbanUseCase::new(Arc::new(config));
        assert!(use_case.execute(input(Some("DE"), None)).is_err());
        assert!(use_case.execute(input(Some("PL"), None)).is_ok());
    }
}

#[cfg(test)]
mod handler_tests {
    use super::support::*;
    use axum::http::StatusCode;

    use crate::domain::iban::Iban;

    #[tokio::test]
    async fn generate_returns_json_payload() {
        let app = app();
        let (status, body) = get_json(&app, "/generators/iban?country=PL&seed=demo").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["country"], "PL");
        assert_eq!(body["seed"], "demo");

        let iban = body["iban"].as_str().unwrap();
        assert!(Iban::parse(iban).is_ok());
        assert_eq!(iban.len(), 28);
        assert_eq!(body["formatted"].as_str().unwrap().replace(' ', ""), iban);

        let (_, again) = get_json(&app, "/generators/iban?country=PL&seed=demo").await;
        assert_eq!(again["iban"], body["iban"]);
    }

    #[tokio::test]
    async fn generate_without_seed_omits_seed_field() {
        let (status, body) = get_json(&app(), "/generators/iban").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["country"], "DE");
        assert!(body.get("seed").is_none());
    }

    #[tokio::test]
    async fn generate_text_format_returns_bare_iban() {
        let (status, headers, bytes) =
            get(&app(), "/generators/iban?country=AT&seed=x&format=text").await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            headers["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.len(), 20);
        assert!(Iban::parse(&text).is_ok());
    }

    #[tokio::test]
    async fn generate_rejects_bad_parameters() {
        let app = app();
        for uri in [
            "/generators/iban?country=XX",
            "/generators/iban?format=xml",
            "/generators/iban?seed=has%20space",
        ] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn validate_accepts_valid_iban() {
        let (status, body) =
            get_json(&app(), "/validators/iban?iban=de89%203704%200044%200532%200130%2000").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["iban"], "DE89370400440532013000");
        assert_eq!(body["country"], "DE");
        assert_eq!(body["formatted"], "DE89 3704 0044 0532 0130 00");
    }

    #[tokio::test]
    async fn validate_reports_reason_for_invalid_iban() {
        let app = app();

        let (status, body) = get_json(&app, "/validators/iban?iban=DE88370400440532013000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["reason"], "Nieprawidłowa suma kontrolna IBAN");
        assert!(body.get("iban").is_none());

        let (_, body) = get_json(&app, "/validators/iban").await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["reason"], "IBAN nie może być pusty");
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;

    use crate::domain::seed::SeedError;
    use crate::error::GeneratorError;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (GeneratorError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                GeneratorError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app_error = GeneratorError::Internal("rng exploded".into()).to_app_error();
        assert!(!app_error.public_message().contains("rng"));
    }

    #[test]
    fn test_seed_error_message_passes_through() {
        let err: GeneratorError = SeedError::Characters.into();
        assert_eq!(
            err.to_app_error().message(),
            SeedError::Characters.message()
        );
    }
}
