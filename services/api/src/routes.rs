use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fincoach::profile::{profile_router, OnboardingService, ProfileClient};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_profile_routes<C: ProfileClient + 'static>(
    service: Arc<OnboardingService<C>>,
) -> axum::Router {
    profile_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryProfileDirectory;
    use axum::body::Body;
    use axum::http::Request;
    use fincoach::profile::FormTemplateCatalog;
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn test_router() -> axum::Router {
        let directory = Arc::new(InMemoryProfileDirectory::default());
        let service = Arc::new(OnboardingService::new(
            directory,
            FormTemplateCatalog::builtin(),
        ));
        with_profile_routes(service)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn template_endpoint_serves_builtin_forms() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/forms/immobilien")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["formType"], "immobilien");
        assert_eq!(
            body["required"].as_array().map(Vec::len),
            Some(6)
        );
    }

    #[tokio::test]
    async fn unknown_form_type_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/forms/bausparen")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_section_answers_null_instead_of_an_error() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/profiles/p-1/sections/income")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn section_save_then_completion_flow() {
        let router = test_router();

        let save = Request::builder()
            .method("PUT")
            .uri("/api/v1/profiles/p-9/sections/income")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"personalId":"p-9","netIncome":2950.0,"taxClass":4}"#,
            ))
            .expect("request builds");
        let response = router.clone().oneshot(save).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let completion = Request::builder()
            .uri("/api/v1/profiles/p-9/completion")
            .body(Body::empty())
            .expect("request builds");
        let response = router
            .oneshot(completion)
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["completionPercentage"], 13);
        assert_eq!(body["isComplete"], false);
        // income is complete, so the wizard resumes at personal details
        assert_eq!(body["currentStep"], 0);
        assert_eq!(body["stepCount"], 8);
    }
}
