use serde::Serialize;

use super::FieldKey;

/// Render control classification for a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldControl {
    Text,
    Number,
    Date,
    Email,
    Select,
    Textarea,
    Checkbox,
}

/// One entry of a select control's choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const MARITAL_STATUS_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "single", label: "Single" },
    ChoiceOption { value: "married", label: "Married" },
    ChoiceOption { value: "divorced", label: "Divorced" },
    ChoiceOption { value: "widowed", label: "Widowed" },
];

const EMPLOYMENT_STATUS_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "employed", label: "Employed" },
    ChoiceOption { value: "selfEmployed", label: "Self-employed" },
    ChoiceOption { value: "civilServant", label: "Civil servant" },
    ChoiceOption { value: "student", label: "Student" },
    ChoiceOption { value: "retired", label: "Retired" },
    ChoiceOption { value: "unemployed", label: "Unemployed" },
];

const TAX_CLASS_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "1", label: "Class I" },
    ChoiceOption { value: "2", label: "Class II" },
    ChoiceOption { value: "3", label: "Class III" },
    ChoiceOption { value: "4", label: "Class IV" },
    ChoiceOption { value: "5", label: "Class V" },
    ChoiceOption { value: "6", label: "Class VI" },
];

const TIME_HORIZON_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "shortTerm", label: "Short term (< 3 years)" },
    ChoiceOption { value: "mediumTerm", label: "Medium term (3-10 years)" },
    ChoiceOption { value: "longTerm", label: "Long term (> 10 years)" },
];

const RISK_CLASS_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "conservative", label: "Conservative" },
    ChoiceOption { value: "balanced", label: "Balanced" },
    ChoiceOption { value: "growth", label: "Growth" },
];

const EXPERIENCE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "none", label: "No experience" },
    ChoiceOption { value: "basic", label: "Basic knowledge" },
    ChoiceOption { value: "advanced", label: "Experienced" },
];

/// Control classification and choice lists, looked up independently of value
/// resolution: a field can resolve to an empty value yet still render with
/// the correct control type.
pub(crate) fn control_for(key: FieldKey) -> FieldControl {
    use FieldKey::*;
    match key {
        BirthDate | EmployedSince => FieldControl::Date,
        Email => FieldControl::Email,
        GrossIncome | NetIncome | ChildBenefit | OtherIncome | Rent | LivingExpenses
        | InsurancePremiums | SavingsRate | OtherExpenses | BankBalance | Securities
        | RealEstateValue | BuildingSociety | LifeInsuranceValue | OtherAssets
        | TargetAmount => FieldControl::Number,
        MaritalStatus | EmploymentStatus | TaxClass | TimeHorizon | RiskClass
        | InvestmentExperience | LossTolerance => FieldControl::Select,
        GoalNotes => FieldControl::Textarea,
        FirstName | LastName | Street | HouseNumber | PostalCode | City | Phone
        | Nationality | Occupation | Employer | PrimaryGoal => FieldControl::Text,
    }
}

pub(crate) fn options_for(key: FieldKey) -> &'static [ChoiceOption] {
    use FieldKey::*;
    match key {
        MaritalStatus => MARITAL_STATUS_OPTIONS,
        EmploymentStatus => EMPLOYMENT_STATUS_OPTIONS,
        TaxClass => TAX_CLASS_OPTIONS,
        TimeHorizon => TIME_HORIZON_OPTIONS,
        RiskClass | LossTolerance => RISK_CLASS_OPTIONS,
        InvestmentExperience => EXPERIENCE_OPTIONS,
        _ => &[],
    }
}

pub(crate) fn label_for(key: FieldKey) -> &'static str {
    use FieldKey::*;
    match key {
        FirstName => "First name",
        LastName => "Last name",
        BirthDate => "Date of birth",
        Street => "Street",
        HouseNumber => "House number",
        PostalCode => "Postal code",
        City => "City",
        Email => "E-mail address",
        Phone => "Phone number",
        Nationality => "Nationality",
        MaritalStatus => "Marital status",
        Occupation => "Occupation",
        Employer => "Employer",
        EmploymentStatus => "Employment status",
        EmployedSince => "Employed since",
        GrossIncome => "Gross monthly income",
        NetIncome => "Net monthly income",
        TaxClass => "Tax class",
        ChildBenefit => "Child benefit",
        OtherIncome => "Other income",
        Rent => "Rent",
        LivingExpenses => "Living expenses",
        InsurancePremiums => "Insurance premiums",
        SavingsRate => "Savings rate",
        OtherExpenses => "Other expenses",
        BankBalance => "Bank balance",
        Securities => "Securities",
        RealEstateValue => "Real estate value",
        BuildingSociety => "Building society savings",
        LifeInsuranceValue => "Life insurance value",
        OtherAssets => "Other assets",
        PrimaryGoal => "Primary goal",
        TargetAmount => "Target amount",
        TimeHorizon => "Time horizon",
        GoalNotes => "Notes on goals",
        RiskClass => "Risk class",
        InvestmentExperience => "Investment experience",
        LossTolerance => "Loss tolerance",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_independent_of_values() {
        assert_eq!(control_for(FieldKey::BirthDate), FieldControl::Date);
        assert_eq!(control_for(FieldKey::NetIncome), FieldControl::Number);
        assert_eq!(control_for(FieldKey::TaxClass), FieldControl::Select);
        assert_eq!(options_for(FieldKey::TaxClass).len(), 6);
        assert!(options_for(FieldKey::FirstName).is_empty());
    }
}
