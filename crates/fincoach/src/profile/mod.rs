//! Client financial profile: section records, completion tracking, the
//! template-driven wizard, consent capture, and field resolution.

pub mod client;
pub mod completion;
pub mod consent;
pub mod domain;
pub mod export;
pub mod identity;
pub mod router;
pub mod service;
pub mod store;
pub mod templates;
pub mod wizard;

pub use client::{ApplicationPayload, AuthUser, ClientError, ProfileClient, SubmissionAck};
pub use completion::{CompletionStatus, CompletionTracker};
pub use consent::{ConsentCapture, ConsentInput, ConsentRejection};
pub use domain::SectionKey;
pub use export::{resolve_field, resolve_liabilities, FieldControl, ResolvedField};
pub use identity::PersonalIdResolver;
pub use router::profile_router;
pub use service::{OnboardingService, OnboardingServiceError, ProfileExport};
pub use store::{SectionData, SectionStore};
pub use templates::{FormTemplate, FormTemplateCatalog, TemplateError, WizardStep};
pub use wizard::{StepOutcome, WizardController, WizardError, WizardPhase};
