use tracing::warn;

use super::client::{AuthUser, ClientError, ProfileClient};
use super::completion::CompletionStatus;
use super::domain::SectionKey;
use super::store::SectionData;

/// Determines the canonical client identifier from the available sources.
///
/// Resolution order, first non-empty wins:
/// 1. the identifier already carried by the completion status,
/// 2. the personal-details record (fetched only when the status marks that
///    section complete), accepting either a `userId`- or `id`-shaped key,
/// 3. the authenticated user's id.
///
/// Returns `None` when nothing resolves; callers treat that as "cannot load
/// dependent sections yet", not as an error. The function is idempotent and
/// safe to re-invoke on every navigation event; at most one fetch happens,
/// and only in branch 2.
pub struct PersonalIdResolver;

impl PersonalIdResolver {
    pub async fn resolve<C: ProfileClient + ?Sized>(
        client: &C,
        completion: Option<&CompletionStatus>,
        auth_user: Option<&AuthUser>,
    ) -> Option<String> {
        if let Some(id) = completion
            .and_then(|status| status.personal_id.as_deref())
            .filter(|raw| !raw.trim().is_empty())
        {
            return Some(id.to_string());
        }

        let details_complete = completion
            .map(|status| status.section_complete(SectionKey::PersonalDetails))
            .unwrap_or(false);

        if details_complete {
            if let Some(lookup_id) = auth_user.map(|user| user.id.as_str()) {
                match client
                    .fetch_section(SectionKey::PersonalDetails, lookup_id)
                    .await
                {
                    Ok(SectionData::PersonalDetails(details)) => {
                        if let Some(id) = details.identifier() {
                            return Some(id.to_string());
                        }
                    }
                    Ok(_) | Err(ClientError::NotFound) => {}
                    Err(err) => {
                        // Degrade to the auth-user branch; the next
                        // navigation event retries resolution.
                        warn!(error = %err, "personal details fetch failed during id resolution");
                    }
                }
            }
        }

        auth_user
            .map(|user| user.id.trim())
            .filter(|raw| !raw.is_empty())
            .map(str::to_string)
    }
}
