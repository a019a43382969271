use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One self-contained category of the client financial profile.
///
/// The variant order is the canonical wizard order; `ordered()` is the single
/// source of truth for step derivation and completion scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    PersonalDetails,
    Employment,
    Income,
    Expenses,
    Assets,
    Liabilities,
    GoalsAndWishes,
    RiskAppetite,
}

impl SectionKey {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::PersonalDetails,
            Self::Employment,
            Self::Income,
            Self::Expenses,
            Self::Assets,
            Self::Liabilities,
            Self::GoalsAndWishes,
            Self::RiskAppetite,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::PersonalDetails => "personalDetails",
            Self::Employment => "employment",
            Self::Income => "income",
            Self::Expenses => "expenses",
            Self::Assets => "assets",
            Self::Liabilities => "liabilities",
            Self::GoalsAndWishes => "goalsAndWishes",
            Self::RiskAppetite => "riskAppetite",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalDetails => "Personal Details",
            Self::Employment => "Employment",
            Self::Income => "Income",
            Self::Expenses => "Expenses",
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::GoalsAndWishes => "Goals & Wishes",
            Self::RiskAppetite => "Risk Appetite",
        }
    }

    /// Parse either the camelCase or the snake_case spelling; upstream
    /// configuration data is not guaranteed to use one convention.
    pub fn from_key(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "personaldetails" | "personal_details" => Some(Self::PersonalDetails),
            "employment" => Some(Self::Employment),
            "income" => Some(Self::Income),
            "expenses" => Some(Self::Expenses),
            "assets" => Some(Self::Assets),
            "liabilities" => Some(Self::Liabilities),
            "goalsandwishes" | "goals_and_wishes" => Some(Self::GoalsAndWishes),
            "riskappetite" | "risk_appetite" => Some(Self::RiskAppetite),
            _ => None,
        }
    }
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|raw| !raw.trim().is_empty())
}

fn non_zero(value: Option<f64>) -> bool {
    value.is_some_and(|amount| amount.abs() > f64::EPSILON)
}

/// Identity and contact data. The record doubles as the identifier source
/// during personal-id resolution: `user_id` wins over the record `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub personal_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub marital_status: Option<String>,
}

impl PersonalDetails {
    /// Identifier extraction for the resolver: accept either key shape.
    pub fn identifier(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .or_else(|| self.id.as_deref().filter(|raw| !raw.is_empty()))
    }

    pub fn has_content(&self) -> bool {
        filled(&self.first_name)
            || filled(&self.last_name)
            || self.birth_date.is_some()
            || filled(&self.street)
            || filled(&self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employment {
    pub personal_id: String,
    pub occupation: Option<String>,
    pub employer: Option<String>,
    pub employment_status: Option<String>,
    pub employed_since: Option<NaiveDate>,
}

impl Employment {
    pub fn has_content(&self) -> bool {
        filled(&self.occupation)
            || filled(&self.employer)
            || filled(&self.employment_status)
            || self.employed_since.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Income {
    pub personal_id: String,
    pub gross_income: Option<f64>,
    pub net_income: Option<f64>,
    pub tax_class: Option<u8>,
    pub child_benefit: Option<f64>,
    pub other_income: Option<f64>,
}

impl Income {
    pub fn has_content(&self) -> bool {
        non_zero(self.gross_income)
            || non_zero(self.net_income)
            || self.tax_class.is_some()
            || non_zero(self.child_benefit)
            || non_zero(self.other_income)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expenses {
    pub personal_id: String,
    pub rent: Option<f64>,
    pub living_expenses: Option<f64>,
    pub insurance_premiums: Option<f64>,
    pub savings_rate: Option<f64>,
    pub other_expenses: Option<f64>,
}

impl Expenses {
    pub fn has_content(&self) -> bool {
        non_zero(self.rent)
            || non_zero(self.living_expenses)
            || non_zero(self.insurance_premiums)
            || non_zero(self.savings_rate)
            || non_zero(self.other_expenses)
    }
}

/// An all-zero assets record does not count as a completed section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assets {
    pub personal_id: String,
    pub bank_balance: Option<f64>,
    pub securities: Option<f64>,
    pub real_estate_value: Option<f64>,
    pub building_society: Option<f64>,
    pub life_insurance_value: Option<f64>,
    pub other_assets: Option<f64>,
}

impl Assets {
    pub fn has_content(&self) -> bool {
        non_zero(self.bank_balance)
            || non_zero(self.securities)
            || non_zero(self.real_estate_value)
            || non_zero(self.building_society)
            || non_zero(self.life_insurance_value)
            || non_zero(self.other_assets)
    }
}

/// One entry per loan; the only multi-valued section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Liability {
    pub personal_id: String,
    pub loan_type: Option<String>,
    pub lender: Option<String>,
    pub original_amount: Option<f64>,
    pub remaining_balance: Option<f64>,
    pub monthly_payment: Option<f64>,
    pub interest_rate: Option<f64>,
    pub end_date: Option<NaiveDate>,
}

impl Liability {
    pub fn has_content(&self) -> bool {
        filled(&self.loan_type)
            || filled(&self.lender)
            || non_zero(self.original_amount)
            || non_zero(self.remaining_balance)
            || non_zero(self.monthly_payment)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalsAndWishes {
    pub personal_id: String,
    pub primary_goal: Option<String>,
    pub target_amount: Option<f64>,
    pub time_horizon: Option<String>,
    pub goal_notes: Option<String>,
}

impl GoalsAndWishes {
    pub fn has_content(&self) -> bool {
        filled(&self.primary_goal)
            || non_zero(self.target_amount)
            || filled(&self.time_horizon)
            || filled(&self.goal_notes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskAppetite {
    pub personal_id: String,
    pub risk_class: Option<String>,
    pub investment_experience: Option<String>,
    pub loss_tolerance: Option<String>,
}

impl RiskAppetite {
    pub fn has_content(&self) -> bool {
        filled(&self.risk_class)
            || filled(&self.investment_experience)
            || filled(&self.loss_tolerance)
    }
}

/// Signed consent captured on the final wizard step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentRecord {
    pub personal_id: String,
    pub place: Option<String>,
    pub consented_on: Option<NaiveDate>,
    pub agreed: bool,
    pub signature: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_key_parses_both_conventions() {
        assert_eq!(
            SectionKey::from_key("personalDetails"),
            Some(SectionKey::PersonalDetails)
        );
        assert_eq!(
            SectionKey::from_key("personal_details"),
            Some(SectionKey::PersonalDetails)
        );
        assert_eq!(
            SectionKey::from_key("goals_and_wishes"),
            Some(SectionKey::GoalsAndWishes)
        );
        assert_eq!(SectionKey::from_key("pension"), None);
    }

    #[test]
    fn all_zero_assets_do_not_count_as_content() {
        let assets = Assets {
            personal_id: "p-1".to_string(),
            bank_balance: Some(0.0),
            securities: Some(0.0),
            ..Assets::default()
        };
        assert!(!assets.has_content());

        let assets = Assets {
            bank_balance: Some(1500.0),
            ..assets
        };
        assert!(assets.has_content());
    }

    #[test]
    fn identifier_prefers_user_id_over_record_id() {
        let details = PersonalDetails {
            id: Some("record-9".to_string()),
            user_id: Some("user-3".to_string()),
            ..PersonalDetails::default()
        };
        assert_eq!(details.identifier(), Some("user-3"));

        let details = PersonalDetails {
            user_id: None,
            ..details
        };
        assert_eq!(details.identifier(), Some("record-9"));
    }

    #[test]
    fn blank_strings_do_not_count_as_content() {
        let employment = Employment {
            personal_id: "p-1".to_string(),
            occupation: Some("   ".to_string()),
            ..Employment::default()
        };
        assert!(!employment.has_content());
    }
}
