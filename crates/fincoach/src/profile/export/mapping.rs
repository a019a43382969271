use std::collections::HashMap;
use std::sync::OnceLock;

use super::FieldKey;

static EXACT_NAME_MAP: OnceLock<HashMap<&'static str, FieldKey>> = OnceLock::new();
static FOLDED_NAME_MAP: OnceLock<HashMap<String, FieldKey>> = OnceLock::new();

/// Exact dictionary lookup. The table carries both the camelCase and the
/// snake_case spelling of every attribute because upstream form
/// configurations are not guaranteed to use one convention.
pub(crate) fn lookup_exact(name: &str) -> Option<FieldKey> {
    exact_name_map().get(name).copied()
}

/// Case-insensitive fallback over the same dictionary.
pub(crate) fn lookup_folded(name: &str) -> Option<FieldKey> {
    folded_name_map()
        .get(&name.trim().to_ascii_lowercase())
        .copied()
}

const NAME_TO_FIELD: &[(&str, FieldKey)] = &[
    // personal details
    ("firstName", FieldKey::FirstName),
    ("first_name", FieldKey::FirstName),
    ("lastName", FieldKey::LastName),
    ("last_name", FieldKey::LastName),
    ("birthDate", FieldKey::BirthDate),
    ("birth_date", FieldKey::BirthDate),
    ("dateOfBirth", FieldKey::BirthDate),
    ("date_of_birth", FieldKey::BirthDate),
    ("street", FieldKey::Street),
    ("streetAddress", FieldKey::Street),
    ("street_address", FieldKey::Street),
    ("houseNumber", FieldKey::HouseNumber),
    ("house_number", FieldKey::HouseNumber),
    ("postalCode", FieldKey::PostalCode),
    ("postal_code", FieldKey::PostalCode),
    ("city", FieldKey::City),
    ("email", FieldKey::Email),
    ("emailAddress", FieldKey::Email),
    ("email_address", FieldKey::Email),
    ("phone", FieldKey::Phone),
    ("phoneNumber", FieldKey::Phone),
    ("phone_number", FieldKey::Phone),
    ("nationality", FieldKey::Nationality),
    ("maritalStatus", FieldKey::MaritalStatus),
    ("marital_status", FieldKey::MaritalStatus),
    // employment
    ("occupation", FieldKey::Occupation),
    ("employer", FieldKey::Employer),
    ("employmentStatus", FieldKey::EmploymentStatus),
    ("employment_status", FieldKey::EmploymentStatus),
    ("employedSince", FieldKey::EmployedSince),
    ("employed_since", FieldKey::EmployedSince),
    // income
    ("grossIncome", FieldKey::GrossIncome),
    ("gross_income", FieldKey::GrossIncome),
    ("netIncome", FieldKey::NetIncome),
    ("net_income", FieldKey::NetIncome),
    ("taxClass", FieldKey::TaxClass),
    ("tax_class", FieldKey::TaxClass),
    ("childBenefit", FieldKey::ChildBenefit),
    ("child_benefit", FieldKey::ChildBenefit),
    ("otherIncome", FieldKey::OtherIncome),
    ("other_income", FieldKey::OtherIncome),
    // expenses
    ("rent", FieldKey::Rent),
    ("coldRent", FieldKey::Rent),
    ("cold_rent", FieldKey::Rent),
    ("livingExpenses", FieldKey::LivingExpenses),
    ("living_expenses", FieldKey::LivingExpenses),
    ("insurancePremiums", FieldKey::InsurancePremiums),
    ("insurance_premiums", FieldKey::InsurancePremiums),
    ("savingsRate", FieldKey::SavingsRate),
    ("savings_rate", FieldKey::SavingsRate),
    ("otherExpenses", FieldKey::OtherExpenses),
    ("other_expenses", FieldKey::OtherExpenses),
    // assets
    ("bankBalance", FieldKey::BankBalance),
    ("bank_balance", FieldKey::BankBalance),
    ("securities", FieldKey::Securities),
    ("securitiesValue", FieldKey::Securities),
    ("securities_value", FieldKey::Securities),
    ("realEstateValue", FieldKey::RealEstateValue),
    ("real_estate_value", FieldKey::RealEstateValue),
    ("buildingSociety", FieldKey::BuildingSociety),
    ("building_society", FieldKey::BuildingSociety),
    ("lifeInsuranceValue", FieldKey::LifeInsuranceValue),
    ("life_insurance_value", FieldKey::LifeInsuranceValue),
    ("otherAssets", FieldKey::OtherAssets),
    ("other_assets", FieldKey::OtherAssets),
    // goals & wishes
    ("primaryGoal", FieldKey::PrimaryGoal),
    ("primary_goal", FieldKey::PrimaryGoal),
    ("targetAmount", FieldKey::TargetAmount),
    ("target_amount", FieldKey::TargetAmount),
    ("timeHorizon", FieldKey::TimeHorizon),
    ("time_horizon", FieldKey::TimeHorizon),
    ("goalNotes", FieldKey::GoalNotes),
    ("goal_notes", FieldKey::GoalNotes),
    // risk appetite
    ("riskClass", FieldKey::RiskClass),
    ("risk_class", FieldKey::RiskClass),
    ("riskTolerance", FieldKey::RiskClass),
    ("risk_tolerance", FieldKey::RiskClass),
    ("investmentExperience", FieldKey::InvestmentExperience),
    ("investment_experience", FieldKey::InvestmentExperience),
    ("lossTolerance", FieldKey::LossTolerance),
    ("loss_tolerance", FieldKey::LossTolerance),
];

fn exact_name_map() -> &'static HashMap<&'static str, FieldKey> {
    EXACT_NAME_MAP.get_or_init(|| {
        let mut map = HashMap::with_capacity(NAME_TO_FIELD.len());
        for (name, key) in NAME_TO_FIELD {
            map.insert(*name, *key);
        }
        map
    })
}

fn folded_name_map() -> &'static HashMap<String, FieldKey> {
    FOLDED_NAME_MAP.get_or_init(|| {
        let mut map = HashMap::with_capacity(NAME_TO_FIELD.len());
        for (name, key) in NAME_TO_FIELD {
            map.insert(name.to_ascii_lowercase(), *key);
        }
        map
    })
}
