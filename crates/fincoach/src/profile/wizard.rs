use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::info;

use super::client::{ApplicationPayload, AuthUser, ClientError, ProfileClient, SubmissionAck};
use super::completion::CompletionStatus;
use super::consent::{ConsentCapture, ConsentInput, ConsentRejection};
use super::identity::PersonalIdResolver;
use super::templates::{FormTemplate, WizardStep};

/// Raw key/value payload collected for one wizard step.
pub type StepData = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitting,
    Complete,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved on to the given step index.
    Advanced(usize),
    /// The last step is done; the wizard is waiting for `submit`.
    ReadyToSubmit,
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Consent(#[from] ConsentRejection),
    #[error("step payload is not a valid section record: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("the wizard has already been submitted")]
    AlreadyComplete,
    #[error("all steps must be completed before submitting")]
    NotReadyToSubmit,
    #[error("no personal identifier resolved yet")]
    IdentityUnresolved,
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Drives step navigation, per-step submission, and the final aggregate
/// hand-off for both the generic profile wizard and the template-driven
/// product wizards.
///
/// The state is exclusively owned by the screen that created it; dropping
/// the controller discards any in-flight results.
pub struct WizardController<C> {
    client: Arc<C>,
    template: FormTemplate,
    current_step: usize,
    phase: WizardPhase,
    edit_mode: bool,
    aggregate: BTreeMap<WizardStep, StepData>,
    personal_id: Option<String>,
    completion: Option<CompletionStatus>,
    auth_user: Option<AuthUser>,
}

impl<C: ProfileClient> WizardController<C> {
    pub fn new(template: FormTemplate, client: Arc<C>) -> Self {
        Self {
            client,
            template,
            current_step: 0,
            phase: WizardPhase::Editing,
            edit_mode: false,
            aggregate: BTreeMap::new(),
            personal_id: None,
            completion: None,
            auth_user: None,
        }
    }

    pub fn template(&self) -> &FormTemplate {
        &self.template
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.template.step_count()
    }

    pub fn current_step_key(&self) -> WizardStep {
        self.template.required[self.current_step]
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn personal_id(&self) -> Option<&str> {
        self.personal_id.as_deref()
    }

    pub fn aggregate_for(&self, step: WizardStep) -> Option<&StepData> {
        self.aggregate.get(&step)
    }

    /// Relaxes the step-navigation guard so a finished profile can be
    /// revisited out of order.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_completion(&mut self, status: CompletionStatus) {
        self.completion = Some(status);
    }

    pub fn set_auth_user(&mut self, user: AuthUser) {
        self.auth_user = Some(user);
    }

    /// Jump to a step. Jumping ahead of the current boundary (without edit
    /// mode) is a no-op, not an error; returns the effective step either way.
    pub fn go_to_step(&mut self, step: usize) -> usize {
        if matches!(self.phase, WizardPhase::Submitting | WizardPhase::Complete) {
            return self.current_step;
        }
        if step < self.step_count() && (step <= self.current_step || self.edit_mode) {
            self.current_step = step;
            if matches!(self.phase, WizardPhase::Failed(_)) {
                self.phase = WizardPhase::Editing;
            }
        }
        self.current_step
    }

    /// Step back one step. The personal id is re-resolved first, because a
    /// later step's save may have changed the canonical data an earlier step
    /// depends on.
    pub async fn previous_step(&mut self) -> usize {
        if matches!(self.phase, WizardPhase::Submitting | WizardPhase::Complete) {
            return self.current_step;
        }

        self.refresh_identity().await;

        if self.current_step > 0 {
            self.current_step -= 1;
            if matches!(self.phase, WizardPhase::Failed(_)) {
                self.phase = WizardPhase::Editing;
            }
        }
        self.current_step
    }

    /// Merge the step payload into the aggregate and advance. New fields
    /// overwrite, unspecified fields from a prior partial save are kept.
    /// On the last step the wizard transitions to `Submitting` instead of
    /// advancing.
    pub fn complete_step(&mut self, data: StepData) -> Result<StepOutcome, WizardError> {
        match self.phase {
            WizardPhase::Submitting => return Err(WizardError::SubmissionInFlight),
            WizardPhase::Complete => return Err(WizardError::AlreadyComplete),
            WizardPhase::Editing | WizardPhase::Failed(_) => {}
        }

        let step = self.current_step_key();
        if step == WizardStep::Consent {
            let consent: ConsentInput =
                serde_json::from_value(Value::Object(data.clone()))?;
            ConsentCapture::validate(&consent)?;
        }

        let slot = self.aggregate.entry(step).or_default();
        for (field, value) in data {
            slot.insert(field, value);
        }

        if self.current_step + 1 == self.step_count() {
            self.phase = WizardPhase::Submitting;
            Ok(StepOutcome::ReadyToSubmit)
        } else {
            self.phase = WizardPhase::Editing;
            self.current_step += 1;
            Ok(StepOutcome::Advanced(self.current_step))
        }
    }

    /// Send the accumulated submission to the save collaborator. On failure
    /// the wizard stays on the last step with all entered data intact so the
    /// user can retry without re-entry.
    pub async fn submit(&mut self) -> Result<SubmissionAck, WizardError> {
        match self.phase {
            WizardPhase::Editing => return Err(WizardError::NotReadyToSubmit),
            WizardPhase::Complete => return Err(WizardError::AlreadyComplete),
            WizardPhase::Submitting | WizardPhase::Failed(_) => {}
        }

        if self.personal_id.is_none() {
            self.refresh_identity().await;
        }
        let personal_id = self
            .personal_id
            .clone()
            .ok_or(WizardError::IdentityUnresolved)?;

        self.phase = WizardPhase::Submitting;
        let payload = build_payload(
            &self.template,
            &personal_id,
            &self.aggregate,
            Utc::now(),
        );

        match self.client.submit_application(payload).await {
            Ok(ack) if ack.success => {
                info!(form_type = %self.template.form_type, "wizard submission accepted");
                self.phase = WizardPhase::Complete;
                Ok(ack)
            }
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| "submission was not accepted".to_string());
                self.phase = WizardPhase::Failed(message.clone());
                Err(WizardError::SubmissionRejected(message))
            }
            Err(err) => {
                self.phase = WizardPhase::Failed(err.to_string());
                Err(WizardError::Client(err))
            }
        }
    }

    async fn refresh_identity(&mut self) {
        if let Some(id) = PersonalIdResolver::resolve(
            self.client.as_ref(),
            self.completion.as_ref(),
            self.auth_user.as_ref(),
        )
        .await
        {
            self.personal_id = Some(id);
        }
    }
}

/// Assemble the composite payload: one entry per completed step, all
/// ISO-timestamp-shaped date strings reduced to their date-only form.
pub fn build_payload(
    template: &FormTemplate,
    personal_id: &str,
    aggregate: &BTreeMap<WizardStep, StepData>,
    submitted_at: DateTime<Utc>,
) -> ApplicationPayload {
    let mut sections = BTreeMap::new();
    for (step, data) in aggregate {
        let mut value = Value::Object(data.clone());
        normalize_dates(&mut value);
        sections.insert(step.key().to_string(), value);
    }

    ApplicationPayload {
        form_type: template.form_type.clone(),
        personal_id: personal_id.to_string(),
        submitted_at,
        sections,
    }
}

/// Reduce every ISO-timestamp-shaped string in the value tree to its
/// date-only prefix.
pub fn normalize_dates(value: &mut Value) {
    match value {
        Value::String(raw) => {
            if let Some(date) = date_only(raw) {
                *raw = date;
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_dates(item);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                normalize_dates(item);
            }
        }
        _ => {}
    }
}

fn date_only(raw: &str) -> Option<String> {
    let (date, _time) = raw.split_once('T')?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(date.to_string())
}
