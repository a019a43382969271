use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fincoach::profile::{
    ApplicationPayload, AuthUser, ClientError, CompletionStatus, CompletionTracker, ProfileClient,
    SectionData, SectionKey, SectionStore, SubmissionAck,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the profile backend so the service and tests can
/// exercise the collaborator contract without a network.
#[derive(Clone)]
pub(crate) struct InMemoryProfileDirectory {
    auth_user: AuthUser,
    profiles: Arc<Mutex<HashMap<String, SectionStore>>>,
    submissions: Arc<Mutex<Vec<ApplicationPayload>>>,
    reject_submissions: Arc<AtomicBool>,
}

impl Default for InMemoryProfileDirectory {
    fn default() -> Self {
        Self::with_auth_user(AuthUser {
            id: "demo-client".to_string(),
            email: Some("demo@example.com".to_string()),
            display_name: Some("Demo Client".to_string()),
        })
    }
}

impl InMemoryProfileDirectory {
    pub(crate) fn with_auth_user(auth_user: AuthUser) -> Self {
        Self {
            auth_user,
            profiles: Arc::new(Mutex::new(HashMap::new())),
            submissions: Arc::new(Mutex::new(Vec::new())),
            reject_submissions: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn submissions(&self) -> Vec<ApplicationPayload> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .clone()
    }

    fn store_for<'a>(
        guard: &'a mut HashMap<String, SectionStore>,
        personal_id: &str,
    ) -> &'a mut SectionStore {
        guard
            .entry(personal_id.to_string())
            .or_insert_with(|| SectionStore::for_personal_id(personal_id))
    }
}

#[async_trait]
impl ProfileClient for InMemoryProfileDirectory {
    async fn fetch_section(
        &self,
        kind: SectionKey,
        personal_id: &str,
    ) -> Result<SectionData, ClientError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        guard
            .get(personal_id)
            .and_then(|store| store.get(kind))
            .ok_or(ClientError::NotFound)
    }

    async fn save_section(&self, data: SectionData) -> Result<SectionData, ClientError> {
        let personal_id = data
            .personal_id()
            .ok_or_else(|| ClientError::Rejected("section record has no personal id".to_string()))?
            .to_string();

        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        Self::store_for(&mut guard, &personal_id).apply(data.clone());
        Ok(data)
    }

    async fn update_section(&self, data: SectionData) -> Result<SectionData, ClientError> {
        let personal_id = data
            .personal_id()
            .ok_or_else(|| ClientError::Rejected("section record has no personal id".to_string()))?
            .to_string();

        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        let store = guard.get_mut(&personal_id).ok_or(ClientError::NotFound)?;
        if store.get(data.key()).is_none() {
            return Err(ClientError::NotFound);
        }
        store.apply(data.clone());
        Ok(data)
    }

    async fn fetch_completion(
        &self,
        personal_id: Option<&str>,
    ) -> Result<CompletionStatus, ClientError> {
        let personal_id = personal_id.unwrap_or(self.auth_user.id.as_str());
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        let status = guard
            .get(personal_id)
            .map(CompletionTracker::compute)
            .unwrap_or_else(|| {
                CompletionTracker::compute(&SectionStore::for_personal_id(personal_id))
            });
        Ok(status)
    }

    async fn fetch_current_user(&self) -> Result<AuthUser, ClientError> {
        Ok(self.auth_user.clone())
    }

    async fn submit_application(
        &self,
        payload: ApplicationPayload,
    ) -> Result<SubmissionAck, ClientError> {
        if self.reject_submissions.load(Ordering::SeqCst) {
            return Ok(SubmissionAck {
                success: false,
                message: Some("submission rejected by backend".to_string()),
            });
        }

        let mut guard = self.submissions.lock().expect("submission mutex poisoned");
        guard.push(payload);
        Ok(SubmissionAck {
            success: true,
            message: Some("application received".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincoach::profile::domain::Income;

    fn income(personal_id: &str, net: f64) -> SectionData {
        SectionData::Income(Income {
            personal_id: personal_id.to_string(),
            net_income: Some(net),
            ..Income::default()
        })
    }

    #[tokio::test]
    async fn save_then_fetch_round_trips_a_section() {
        let directory = InMemoryProfileDirectory::default();
        directory
            .save_section(income("p-1", 2400.0))
            .await
            .expect("save succeeds");

        let fetched = directory
            .fetch_section(SectionKey::Income, "p-1")
            .await
            .expect("fetch succeeds");
        assert_eq!(fetched, income("p-1", 2400.0));
    }

    #[tokio::test]
    async fn update_requires_existing_data() {
        let directory = InMemoryProfileDirectory::default();
        let error = directory
            .update_section(income("p-2", 2100.0))
            .await
            .expect_err("nothing to update");
        assert!(matches!(error, ClientError::NotFound));
    }

    #[tokio::test]
    async fn completion_reflects_saved_sections() {
        let directory = InMemoryProfileDirectory::default();
        directory
            .save_section(income("p-3", 3100.0))
            .await
            .expect("save succeeds");

        let status = directory
            .fetch_completion(Some("p-3"))
            .await
            .expect("completion computes");
        assert!(status.section_complete(SectionKey::Income));
        assert!(!status.is_complete);
    }
}
