use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::client::{
    fetch_section_or_none, ApplicationPayload, ClientError, ProfileClient, SubmissionAck,
};
use super::completion::{CompletionStatus, CompletionTracker};
use super::consent::{ConsentCapture, ConsentInput, ConsentRejection};
use super::domain::SectionKey;
use super::export::{is_liability_field, resolve_field, resolve_liabilities, ResolvedField};
use super::store::{SectionData, SectionStore};
use super::templates::{FormTemplate, FormTemplateCatalog, TemplateError, WizardStep};
use super::wizard::{self, StepData};

/// Completion summary plus the derived wizard position, so navigation
/// callers never re-derive one from the other.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionView {
    #[serde(flatten)]
    pub status: CompletionStatus,
    pub current_step: usize,
    pub step_count: usize,
}

/// Resolved export for the coach-side viewer: scalar fields plus one field
/// group per liability entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileExport {
    pub personal_id: String,
    pub fields: Vec<ResolvedField>,
    pub liabilities: Vec<Vec<ResolvedField>>,
}

/// Aggregated one-shot submission of a template-driven application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub personal_id: String,
    #[serde(default)]
    pub sections: std::collections::BTreeMap<String, StepData>,
    #[serde(default)]
    pub consent: Option<ConsentInput>,
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Consent(#[from] ConsentRejection),
    #[error("unknown section kind '{0}'")]
    UnknownSection(String),
    #[error("section payload is not a valid {kind} record: {source}")]
    InvalidSection {
        kind: &'static str,
        source: serde_json::Error,
    },
}

/// Service facade composing the collaborator client with the template
/// catalog; the HTTP router and the CLI demo both drive this.
pub struct OnboardingService<C> {
    client: Arc<C>,
    catalog: FormTemplateCatalog,
}

impl<C: ProfileClient> OnboardingService<C> {
    pub fn new(client: Arc<C>, catalog: FormTemplateCatalog) -> Self {
        Self { client, catalog }
    }

    pub fn client(&self) -> Arc<C> {
        self.client.clone()
    }

    pub fn catalog(&self) -> &FormTemplateCatalog {
        &self.catalog
    }

    pub fn template(&self, form_type: &str) -> Result<&FormTemplate, TemplateError> {
        self.catalog.get(form_type)
    }

    /// Assemble a profile snapshot. Sections without saved data are simply
    /// absent; only genuine collaborator failures propagate.
    pub async fn snapshot(&self, personal_id: &str) -> Result<SectionStore, ClientError> {
        let mut store = SectionStore::for_personal_id(personal_id);
        for kind in SectionKey::ordered() {
            if let Some(data) = fetch_section_or_none(self.client.as_ref(), kind, personal_id).await?
            {
                store.apply(data);
            }
        }
        Ok(store)
    }

    pub async fn completion(&self, personal_id: &str) -> Result<CompletionView, ClientError> {
        let store = self.snapshot(personal_id).await?;
        let status = CompletionTracker::compute(&store);
        let current_step = CompletionTracker::current_step(&status);
        Ok(CompletionView {
            status,
            current_step,
            step_count: SectionKey::ordered().len(),
        })
    }

    /// Project the profile onto a configured field list. Liability names in
    /// the list switch on the repeating-entry resolution; everything else is
    /// resolved as a scalar.
    pub async fn export(
        &self,
        personal_id: &str,
        field_names: &[String],
    ) -> Result<ProfileExport, ClientError> {
        let store = self.snapshot(personal_id).await?;

        let mut fields = Vec::with_capacity(field_names.len());
        let mut include_liabilities = false;
        for name in field_names {
            if is_liability_field(name) {
                include_liabilities = true;
            } else {
                fields.push(resolve_field(name, &store));
            }
        }

        let liabilities = if include_liabilities {
            resolve_liabilities(&store)
        } else {
            Vec::new()
        };

        Ok(ProfileExport {
            personal_id: personal_id.to_string(),
            fields,
            liabilities,
        })
    }

    /// Store one section payload, creating or updating depending on whether
    /// the collaborator already has data for it.
    pub async fn store_section(
        &self,
        kind: SectionKey,
        personal_id: &str,
        payload: Value,
    ) -> Result<SectionData, OnboardingServiceError> {
        let data = SectionData::from_value(kind, payload).map_err(|source| {
            OnboardingServiceError::InvalidSection {
                kind: kind.key(),
                source,
            }
        })?;

        let existing = fetch_section_or_none(self.client.as_ref(), kind, personal_id).await?;
        let stored = if existing.is_some() {
            self.client.update_section(data).await?
        } else {
            self.client.save_section(data).await?
        };
        Ok(stored)
    }

    /// One-shot submission of an aggregated template application: consent is
    /// validated when the template requires it, dates are normalized, and
    /// the composite payload goes to the save collaborator.
    pub async fn submit(
        &self,
        form_type: &str,
        request: SubmissionRequest,
    ) -> Result<SubmissionAck, OnboardingServiceError> {
        let template = self.catalog.get(form_type)?;

        if template.requires_consent() {
            let consent = request.consent.clone().unwrap_or_default();
            ConsentCapture::validate(&consent)?;
        }

        let mut aggregate = std::collections::BTreeMap::new();
        for (raw_key, data) in request.sections {
            let step = WizardStep::from_key(&raw_key)
                .ok_or(OnboardingServiceError::UnknownSection(raw_key))?;
            aggregate.insert(step, data);
        }
        if let Some(consent) = request.consent {
            if let Ok(Value::Object(map)) = serde_json::to_value(consent) {
                aggregate.insert(WizardStep::Consent, map);
            }
        }

        let payload: ApplicationPayload = wizard::build_payload(
            template,
            &request.personal_id,
            &aggregate,
            Utc::now(),
        );

        let ack = self.client.submit_application(payload).await?;
        info!(form_type, success = ack.success, "application submission forwarded");
        Ok(ack)
    }
}
