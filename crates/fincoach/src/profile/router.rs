use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::client::{ClientError, ProfileClient};
use super::domain::SectionKey;
use super::service::{OnboardingService, OnboardingServiceError, SubmissionRequest};
use super::templates::TemplateError;

/// Router builder exposing the profile, template, submission, and export
/// endpoints over an [`OnboardingService`].
pub fn profile_router<C: ProfileClient + 'static>(service: Arc<OnboardingService<C>>) -> Router {
    Router::new()
        .route("/api/v1/forms", get(list_forms_handler::<C>))
        .route("/api/v1/forms/:form_type", get(template_handler::<C>))
        .route(
            "/api/v1/forms/:form_type/submissions",
            post(submission_handler::<C>),
        )
        .route(
            "/api/v1/profiles/:personal_id/completion",
            get(completion_handler::<C>),
        )
        .route(
            "/api/v1/profiles/:personal_id/sections/:kind",
            get(fetch_section_handler::<C>).put(store_section_handler::<C>),
        )
        .route(
            "/api/v1/profiles/:personal_id/export",
            post(export_handler::<C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportRequest {
    #[serde(default)]
    pub(crate) fields: Vec<String>,
}

fn service_error_response(error: OnboardingServiceError) -> Response {
    let status = match &error {
        OnboardingServiceError::Consent(_) => StatusCode::UNPROCESSABLE_ENTITY,
        OnboardingServiceError::Template(TemplateError::UnknownFormType(_)) => {
            StatusCode::NOT_FOUND
        }
        OnboardingServiceError::Template(_)
        | OnboardingServiceError::UnknownSection(_)
        | OnboardingServiceError::InvalidSection { .. } => StatusCode::BAD_REQUEST,
        OnboardingServiceError::Client(ClientError::NotFound) => StatusCode::NOT_FOUND,
        OnboardingServiceError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn list_forms_handler<C: ProfileClient>(
    State(service): State<Arc<OnboardingService<C>>>,
) -> Response {
    let forms = service.catalog().form_types();
    (StatusCode::OK, axum::Json(json!({ "formTypes": forms }))).into_response()
}

pub(crate) async fn template_handler<C: ProfileClient>(
    State(service): State<Arc<OnboardingService<C>>>,
    Path(form_type): Path<String>,
) -> Response {
    match service.template(&form_type) {
        Ok(template) => (StatusCode::OK, axum::Json(template.clone())).into_response(),
        Err(error) => service_error_response(OnboardingServiceError::Template(error)),
    }
}

pub(crate) async fn submission_handler<C: ProfileClient>(
    State(service): State<Arc<OnboardingService<C>>>,
    Path(form_type): Path<String>,
    axum::Json(request): axum::Json<SubmissionRequest>,
) -> Response {
    match service.submit(&form_type, request).await {
        Ok(ack) if ack.success => (StatusCode::ACCEPTED, axum::Json(ack)).into_response(),
        Ok(ack) => (StatusCode::BAD_GATEWAY, axum::Json(ack)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn completion_handler<C: ProfileClient>(
    State(service): State<Arc<OnboardingService<C>>>,
    Path(personal_id): Path<String>,
) -> Response {
    match service.completion(&personal_id).await {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => service_error_response(OnboardingServiceError::Client(error)),
    }
}

/// Missing section data is an expected outcome, not an error: the handler
/// answers with an explicit `null` so clients fall back to defaults.
pub(crate) async fn fetch_section_handler<C: ProfileClient>(
    State(service): State<Arc<OnboardingService<C>>>,
    Path((personal_id, kind)): Path<(String, String)>,
) -> Response {
    let Some(kind) = SectionKey::from_key(&kind) else {
        return service_error_response(OnboardingServiceError::UnknownSection(kind));
    };

    match super::client::fetch_section_or_none(service.client().as_ref(), kind, &personal_id).await
    {
        Ok(Some(data)) => (StatusCode::OK, axum::Json(data)).into_response(),
        Ok(None) => (StatusCode::OK, axum::Json(serde_json::Value::Null)).into_response(),
        Err(error) => service_error_response(OnboardingServiceError::Client(error)),
    }
}

pub(crate) async fn store_section_handler<C: ProfileClient>(
    State(service): State<Arc<OnboardingService<C>>>,
    Path((personal_id, kind)): Path<(String, String)>,
    axum::Json(payload): axum::Json<serde_json::Value>,
) -> Response {
    let Some(kind) = SectionKey::from_key(&kind) else {
        return service_error_response(OnboardingServiceError::UnknownSection(kind));
    };

    match service.store_section(kind, &personal_id, payload).await {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn export_handler<C: ProfileClient>(
    State(service): State<Arc<OnboardingService<C>>>,
    Path(personal_id): Path<String>,
    axum::Json(request): axum::Json<ExportRequest>,
) -> Response {
    match service.export(&personal_id, &request.fields).await {
        Ok(export) => (StatusCode::OK, axum::Json(export)).into_response(),
        Err(error) => service_error_response(OnboardingServiceError::Client(error)),
    }
}
