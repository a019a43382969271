use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::SectionKey;
use super::store::SectionStore;

/// Derived summary of which sections are filled for a profile. Never edited
/// directly; recomputed after every successful section save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionStatus {
    pub sections: BTreeMap<SectionKey, bool>,
    pub completion_percentage: u8,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_id: Option<String>,
}

impl CompletionStatus {
    pub fn section_complete(&self, key: SectionKey) -> bool {
        self.sections.get(&key).copied().unwrap_or(false)
    }
}

/// Single writer for `CompletionStatus`; everything else reads.
pub struct CompletionTracker;

impl CompletionTracker {
    pub fn compute(store: &SectionStore) -> CompletionStatus {
        let keys = SectionKey::ordered();
        let mut sections = BTreeMap::new();
        let mut complete_count = 0usize;

        for key in keys {
            let present = store.section_present(key);
            if present {
                complete_count += 1;
            }
            sections.insert(key, present);
        }

        let completion_percentage =
            ((complete_count as f32 / keys.len() as f32) * 100.0).round() as u8;

        CompletionStatus {
            sections,
            completion_percentage,
            is_complete: complete_count == keys.len(),
            personal_id: store.personal_id.clone(),
        }
    }

    /// Index of the first incomplete section in canonical order. A fully
    /// complete profile still needs a displayable step, so the result is
    /// clamped to the last valid index rather than running off the end.
    pub fn current_step(status: &CompletionStatus) -> usize {
        let keys = SectionKey::ordered();
        keys.iter()
            .position(|key| !status.section_complete(*key))
            .unwrap_or(keys.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::domain::{Assets, Employment, Income, PersonalDetails};
    use crate::profile::store::SectionData;

    fn store_with_personal_details() -> SectionStore {
        let mut store = SectionStore::for_personal_id("p-11");
        store.apply(SectionData::PersonalDetails(PersonalDetails {
            personal_id: "p-11".to_string(),
            first_name: Some("Anna".to_string()),
            last_name: Some("Keller".to_string()),
            ..PersonalDetails::default()
        }));
        store
    }

    fn fully_complete_store() -> SectionStore {
        let mut store = store_with_personal_details();
        store.apply(SectionData::Employment(Employment {
            personal_id: "p-11".to_string(),
            occupation: Some("Nurse".to_string()),
            ..Employment::default()
        }));
        store.apply(SectionData::Income(Income {
            personal_id: "p-11".to_string(),
            net_income: Some(2600.0),
            ..Income::default()
        }));
        store.apply(SectionData::Expenses(crate::profile::domain::Expenses {
            personal_id: "p-11".to_string(),
            rent: Some(900.0),
            ..Default::default()
        }));
        store.apply(SectionData::Assets(Assets {
            personal_id: "p-11".to_string(),
            bank_balance: Some(12000.0),
            ..Assets::default()
        }));
        store.apply(SectionData::Liabilities(vec![
            crate::profile::domain::Liability {
                personal_id: "p-11".to_string(),
                lender: Some("Sparkasse".to_string()),
                remaining_balance: Some(8000.0),
                ..Default::default()
            },
        ]));
        store.apply(SectionData::GoalsAndWishes(
            crate::profile::domain::GoalsAndWishes {
                personal_id: "p-11".to_string(),
                primary_goal: Some("ownHome".to_string()),
                ..Default::default()
            },
        ));
        store.apply(SectionData::RiskAppetite(
            crate::profile::domain::RiskAppetite {
                personal_id: "p-11".to_string(),
                risk_class: Some("balanced".to_string()),
                ..Default::default()
            },
        ));
        store
    }

    #[test]
    fn one_of_eight_sections_rounds_to_thirteen_percent() {
        let status = CompletionTracker::compute(&store_with_personal_details());
        assert_eq!(status.completion_percentage, 13);
        assert!(!status.is_complete);
        assert_eq!(status.personal_id.as_deref(), Some("p-11"));
        assert_eq!(CompletionTracker::current_step(&status), 1);
    }

    #[test]
    fn empty_profile_starts_at_step_zero() {
        let status = CompletionTracker::compute(&SectionStore::default());
        assert_eq!(status.completion_percentage, 0);
        assert_eq!(CompletionTracker::current_step(&status), 0);
    }

    #[test]
    fn is_complete_holds_iff_every_section_is_true() {
        let status = CompletionTracker::compute(&fully_complete_store());
        assert!(status.is_complete);
        assert!(status.sections.values().all(|present| *present));
        assert_eq!(status.completion_percentage, 100);
    }

    #[test]
    fn complete_profile_clamps_to_last_step_index() {
        let status = CompletionTracker::compute(&fully_complete_store());
        assert_eq!(
            CompletionTracker::current_step(&status),
            SectionKey::ordered().len() - 1
        );
    }

    #[test]
    fn all_zero_assets_leave_the_section_incomplete() {
        let mut store = fully_complete_store();
        store.apply(SectionData::Assets(Assets {
            personal_id: "p-11".to_string(),
            bank_balance: Some(0.0),
            securities: Some(0.0),
            ..Assets::default()
        }));

        let status = CompletionTracker::compute(&store);
        assert!(!status.is_complete);
        assert!(!status.section_complete(SectionKey::Assets));
        // assets sits at index 4 in canonical order
        assert_eq!(CompletionTracker::current_step(&status), 4);
    }
}
