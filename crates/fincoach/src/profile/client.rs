use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::completion::CompletionStatus;
use super::domain::SectionKey;
use super::store::SectionData;

/// Authenticated portal user as handed over by the session layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Composite wizard submission handed to the save collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub form_type: String,
    pub personal_id: String,
    pub submitted_at: DateTime<Utc>,
    pub sections: BTreeMap<String, serde_json::Value>,
}

/// Collaborator acknowledgement for a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error enumeration for collaborator failures. `NotFound` on reads is a
/// benign, expected outcome ("no data saved for this section yet") and must
/// never surface to the user as an error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("record not found")]
    NotFound,
    #[error("profile backend unavailable: {0}")]
    Unavailable(String),
    #[error("rejected by profile backend: {0}")]
    Rejected(String),
}

/// Seam to the network/storage collaborator for profile data. The core never
/// implements transport; it consumes this contract.
#[async_trait]
pub trait ProfileClient: Send + Sync {
    async fn fetch_section(
        &self,
        kind: SectionKey,
        personal_id: &str,
    ) -> Result<SectionData, ClientError>;

    async fn save_section(&self, data: SectionData) -> Result<SectionData, ClientError>;

    async fn update_section(&self, data: SectionData) -> Result<SectionData, ClientError>;

    async fn fetch_completion(
        &self,
        personal_id: Option<&str>,
    ) -> Result<CompletionStatus, ClientError>;

    async fn fetch_current_user(&self) -> Result<AuthUser, ClientError>;

    async fn submit_application(
        &self,
        payload: ApplicationPayload,
    ) -> Result<SubmissionAck, ClientError>;
}

/// Fetch a section, converting the benign NotFound into `None`.
pub async fn fetch_section_or_none<C: ProfileClient + ?Sized>(
    client: &C,
    kind: SectionKey,
    personal_id: &str,
) -> Result<Option<SectionData>, ClientError> {
    match client.fetch_section(kind, personal_id).await {
        Ok(data) => Ok(Some(data)),
        Err(ClientError::NotFound) => Ok(None),
        Err(other) => Err(other),
    }
}
