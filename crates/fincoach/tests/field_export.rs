//! Coach-side export scenarios: projecting a profile snapshot onto
//! configuration-defined field lists through the public service facade.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use fincoach::profile::{
        ApplicationPayload, AuthUser, ClientError, CompletionStatus, CompletionTracker,
        ProfileClient, SectionData, SectionKey, SectionStore, SubmissionAck,
    };

    pub(super) struct SnapshotClient {
        profiles: Mutex<HashMap<String, SectionStore>>,
    }

    impl SnapshotClient {
        pub(super) fn seeded(store: SectionStore) -> Arc<Self> {
            let personal_id = store.personal_id.clone().unwrap_or_default();
            let mut profiles = HashMap::new();
            profiles.insert(personal_id, store);
            Arc::new(Self {
                profiles: Mutex::new(profiles),
            })
        }
    }

    #[async_trait]
    impl ProfileClient for SnapshotClient {
        async fn fetch_section(
            &self,
            kind: SectionKey,
            personal_id: &str,
        ) -> Result<SectionData, ClientError> {
            let guard = self.profiles.lock().expect("mutex poisoned");
            guard
                .get(personal_id)
                .and_then(|store| store.get(kind))
                .ok_or(ClientError::NotFound)
        }

        async fn save_section(&self, data: SectionData) -> Result<SectionData, ClientError> {
            Ok(data)
        }

        async fn update_section(&self, data: SectionData) -> Result<SectionData, ClientError> {
            Ok(data)
        }

        async fn fetch_completion(
            &self,
            personal_id: Option<&str>,
        ) -> Result<CompletionStatus, ClientError> {
            let guard = self.profiles.lock().expect("mutex poisoned");
            Ok(personal_id
                .and_then(|id| guard.get(id))
                .map(CompletionTracker::compute)
                .unwrap_or_default())
        }

        async fn fetch_current_user(&self) -> Result<AuthUser, ClientError> {
            Err(ClientError::NotFound)
        }

        async fn submit_application(
            &self,
            _payload: ApplicationPayload,
        ) -> Result<SubmissionAck, ClientError> {
            Ok(SubmissionAck {
                success: true,
                message: None,
            })
        }
    }
}

use serde_json::{json, Value};

use common::SnapshotClient;
use fincoach::profile::domain::{Income, Liability, PersonalDetails};
use fincoach::profile::export::csv::write_export;
use fincoach::profile::{FormTemplateCatalog, OnboardingService, SectionStore};

fn seeded_store() -> SectionStore {
    let mut store = SectionStore::for_personal_id("p-44");
    store.personal_details = Some(PersonalDetails {
        personal_id: "p-44".to_string(),
        first_name: Some("Anna".to_string()),
        last_name: Some("Keller".to_string()),
        birth_date: chrono::NaiveDate::from_ymd_opt(1991, 4, 23),
        street: Some("Lindenweg".to_string()),
        ..PersonalDetails::default()
    });
    store.income = Some(Income {
        personal_id: "p-44".to_string(),
        net_income: Some(2900.0),
        tax_class: Some(3),
        ..Income::default()
    });
    store.liabilities = vec![
        Liability {
            personal_id: "p-44".to_string(),
            loan_type: Some("consumerLoan".to_string()),
            lender: Some("Sparkasse".to_string()),
            remaining_balance: Some(8400.0),
            ..Liability::default()
        },
        Liability {
            personal_id: "p-44".to_string(),
            lender: Some("Volksbank".to_string()),
            monthly_payment: Some(210.0),
            ..Liability::default()
        },
    ];
    store
}

fn service() -> OnboardingService<SnapshotClient> {
    let client = SnapshotClient::seeded(seeded_store());
    OnboardingService::new(client, FormTemplateCatalog::builtin())
}

#[tokio::test]
async fn export_resolves_scalars_and_groups_liability_entries() {
    let export = service()
        .export(
            "p-44",
            &[
                "firstName".to_string(),
                "net_income".to_string(),
                "totallyUnknownField".to_string(),
                "remainingBalance".to_string(),
            ],
        )
        .await
        .expect("export resolves");

    assert_eq!(export.personal_id, "p-44");
    assert_eq!(export.fields.len(), 3);

    let first_name = &export.fields[0];
    assert_eq!(first_name.value, json!("Anna"));
    assert_eq!(first_name.label, "First name");

    let net_income = &export.fields[1];
    assert_eq!(net_income.value, json!(2900.0));

    let unknown = &export.fields[2];
    assert_eq!(unknown.value, Value::Null);

    // one field group per liability entry, every attribute resolved
    assert_eq!(export.liabilities.len(), 2);
    assert!(export.liabilities[0]
        .iter()
        .any(|field| field.name == "lender" && field.value == json!("Sparkasse")));
    assert!(export.liabilities[1]
        .iter()
        .any(|field| field.name == "lender" && field.value == json!("Volksbank")));
    assert!(export.liabilities[0].iter().all(|field| field.is_repeating));
}

#[tokio::test]
async fn export_without_liability_names_stays_scalar() {
    let export = service()
        .export("p-44", &["firstName".to_string(), "taxClass".to_string()])
        .await
        .expect("export resolves");

    assert!(export.liabilities.is_empty());
    assert_eq!(export.fields.len(), 2);
    assert_eq!(export.fields[1].value, json!("3"));
}

#[tokio::test]
async fn unknown_profile_exports_blank_fields() {
    let export = service()
        .export("nobody", &["firstName".to_string()])
        .await
        .expect("absent sections degrade to defaults");

    assert_eq!(export.fields[0].value, Value::Null);
}

#[tokio::test]
async fn csv_rendering_matches_the_resolved_set() {
    let export = service()
        .export(
            "p-44",
            &["first_name".to_string(), "lender".to_string()],
        )
        .await
        .expect("export resolves");

    let mut buffer = Vec::new();
    write_export(&mut buffer, &export.fields, &export.liabilities).expect("csv writes");
    let rendered = String::from_utf8(buffer).expect("utf-8");

    assert!(rendered.contains("first_name,First name,Anna"));
    assert!(rendered.contains("liabilities[0].lender,Lender,Sparkasse"));
    assert!(rendered.contains("liabilities[1].lender,Lender,Volksbank"));
}
