use serde::{Deserialize, Serialize};

use super::domain::{
    Assets, ConsentRecord, Employment, Expenses, GoalsAndWishes, Income, Liability,
    PersonalDetails, RiskAppetite, SectionKey,
};

/// Snapshot of one client profile: the eight sections plus consent metadata.
/// Pure data; completion and export logic live in their own modules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionStore {
    pub personal_id: Option<String>,
    pub personal_details: Option<PersonalDetails>,
    pub employment: Option<Employment>,
    pub income: Option<Income>,
    pub expenses: Option<Expenses>,
    pub assets: Option<Assets>,
    pub liabilities: Vec<Liability>,
    pub goals_and_wishes: Option<GoalsAndWishes>,
    pub risk_appetite: Option<RiskAppetite>,
    pub consent: Option<ConsentRecord>,
}

/// Tagged section payload so storage and routing can dispatch on one value
/// instead of a chain of conditionals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionData {
    PersonalDetails(PersonalDetails),
    Employment(Employment),
    Income(Income),
    Expenses(Expenses),
    Assets(Assets),
    Liabilities(Vec<Liability>),
    GoalsAndWishes(GoalsAndWishes),
    RiskAppetite(RiskAppetite),
}

impl SectionData {
    pub const fn key(&self) -> SectionKey {
        match self {
            SectionData::PersonalDetails(_) => SectionKey::PersonalDetails,
            SectionData::Employment(_) => SectionKey::Employment,
            SectionData::Income(_) => SectionKey::Income,
            SectionData::Expenses(_) => SectionKey::Expenses,
            SectionData::Assets(_) => SectionKey::Assets,
            SectionData::Liabilities(_) => SectionKey::Liabilities,
            SectionData::GoalsAndWishes(_) => SectionKey::GoalsAndWishes,
            SectionData::RiskAppetite(_) => SectionKey::RiskAppetite,
        }
    }

    /// The owning profile reference carried by the record. Every section
    /// holds exactly one; for liabilities it is the first entry's.
    pub fn personal_id(&self) -> Option<&str> {
        let raw = match self {
            SectionData::PersonalDetails(record) => record.personal_id.as_str(),
            SectionData::Employment(record) => record.personal_id.as_str(),
            SectionData::Income(record) => record.personal_id.as_str(),
            SectionData::Expenses(record) => record.personal_id.as_str(),
            SectionData::Assets(record) => record.personal_id.as_str(),
            SectionData::Liabilities(records) => records
                .first()
                .map(|record| record.personal_id.as_str())
                .unwrap_or(""),
            SectionData::GoalsAndWishes(record) => record.personal_id.as_str(),
            SectionData::RiskAppetite(record) => record.personal_id.as_str(),
        };
        if raw.is_empty() {
            None
        } else {
            Some(raw)
        }
    }

    /// Parse a raw JSON payload into the typed record for `kind`.
    pub fn from_value(
        kind: SectionKey,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            SectionKey::PersonalDetails => {
                SectionData::PersonalDetails(serde_json::from_value(value)?)
            }
            SectionKey::Employment => SectionData::Employment(serde_json::from_value(value)?),
            SectionKey::Income => SectionData::Income(serde_json::from_value(value)?),
            SectionKey::Expenses => SectionData::Expenses(serde_json::from_value(value)?),
            SectionKey::Assets => SectionData::Assets(serde_json::from_value(value)?),
            SectionKey::Liabilities => SectionData::Liabilities(serde_json::from_value(value)?),
            SectionKey::GoalsAndWishes => {
                SectionData::GoalsAndWishes(serde_json::from_value(value)?)
            }
            SectionKey::RiskAppetite => SectionData::RiskAppetite(serde_json::from_value(value)?),
        })
    }
}

impl SectionStore {
    pub fn for_personal_id(personal_id: impl Into<String>) -> Self {
        Self {
            personal_id: Some(personal_id.into()),
            ..Self::default()
        }
    }

    /// Install a section record, replacing any previous value for that key.
    pub fn apply(&mut self, data: SectionData) {
        match data {
            SectionData::PersonalDetails(record) => self.personal_details = Some(record),
            SectionData::Employment(record) => self.employment = Some(record),
            SectionData::Income(record) => self.income = Some(record),
            SectionData::Expenses(record) => self.expenses = Some(record),
            SectionData::Assets(record) => self.assets = Some(record),
            SectionData::Liabilities(records) => self.liabilities = records,
            SectionData::GoalsAndWishes(record) => self.goals_and_wishes = Some(record),
            SectionData::RiskAppetite(record) => self.risk_appetite = Some(record),
        }
    }

    pub fn get(&self, key: SectionKey) -> Option<SectionData> {
        match key {
            SectionKey::PersonalDetails => self
                .personal_details
                .clone()
                .map(SectionData::PersonalDetails),
            SectionKey::Employment => self.employment.clone().map(SectionData::Employment),
            SectionKey::Income => self.income.clone().map(SectionData::Income),
            SectionKey::Expenses => self.expenses.clone().map(SectionData::Expenses),
            SectionKey::Assets => self.assets.clone().map(SectionData::Assets),
            SectionKey::Liabilities => {
                if self.liabilities.is_empty() {
                    None
                } else {
                    Some(SectionData::Liabilities(self.liabilities.clone()))
                }
            }
            SectionKey::GoalsAndWishes => self
                .goals_and_wishes
                .clone()
                .map(SectionData::GoalsAndWishes),
            SectionKey::RiskAppetite => self.risk_appetite.clone().map(SectionData::RiskAppetite),
        }
    }

    /// A section is present only when it exists and carries at least one
    /// semantically meaningful value.
    pub fn section_present(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::PersonalDetails => self
                .personal_details
                .as_ref()
                .is_some_and(PersonalDetails::has_content),
            SectionKey::Employment => self
                .employment
                .as_ref()
                .is_some_and(Employment::has_content),
            SectionKey::Income => self.income.as_ref().is_some_and(Income::has_content),
            SectionKey::Expenses => self.expenses.as_ref().is_some_and(Expenses::has_content),
            SectionKey::Assets => self.assets.as_ref().is_some_and(Assets::has_content),
            SectionKey::Liabilities => self.liabilities.iter().any(Liability::has_content),
            SectionKey::GoalsAndWishes => self
                .goals_and_wishes
                .as_ref()
                .is_some_and(GoalsAndWishes::has_content),
            SectionKey::RiskAppetite => self
                .risk_appetite
                .as_ref()
                .is_some_and(RiskAppetite::has_content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn apply_replaces_only_the_targeted_section() {
        let mut store = SectionStore::for_personal_id("p-7");
        store.apply(SectionData::Income(Income {
            personal_id: "p-7".to_string(),
            gross_income: Some(5200.0),
            ..Income::default()
        }));
        store.apply(SectionData::Employment(Employment {
            personal_id: "p-7".to_string(),
            occupation: Some("Engineer".to_string()),
            ..Employment::default()
        }));

        assert!(store.section_present(SectionKey::Income));
        assert!(store.section_present(SectionKey::Employment));
        assert!(!store.section_present(SectionKey::Assets));
    }

    #[test]
    fn empty_liability_list_is_absent() {
        let store = SectionStore::default();
        assert!(store.get(SectionKey::Liabilities).is_none());
        assert!(!store.section_present(SectionKey::Liabilities));
    }

    #[test]
    fn from_value_parses_camel_case_payloads() {
        let data = SectionData::from_value(
            SectionKey::Income,
            json!({ "personalId": "p-1", "netIncome": 2900.0 }),
        )
        .expect("income parses");

        match data {
            SectionData::Income(income) => assert_eq!(income.net_income, Some(2900.0)),
            other => panic!("expected income, got {other:?}"),
        }
    }
}
