//! Field resolution: project a normalized client profile onto arbitrary,
//! configuration-defined forms. An unknown field name never fails; it
//! resolves to an empty value and renders as a blank control.

mod controls;
pub mod csv;
mod heuristics;
mod mapping;

pub use controls::{ChoiceOption, FieldControl};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::domain::Liability;
use super::store::SectionStore;

/// Every profile attribute a form template may reference, one variant per
/// underlying field regardless of how the template spells its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    FirstName,
    LastName,
    BirthDate,
    Street,
    HouseNumber,
    PostalCode,
    City,
    Email,
    Phone,
    Nationality,
    MaritalStatus,
    Occupation,
    Employer,
    EmploymentStatus,
    EmployedSince,
    GrossIncome,
    NetIncome,
    TaxClass,
    ChildBenefit,
    OtherIncome,
    Rent,
    LivingExpenses,
    InsurancePremiums,
    SavingsRate,
    OtherExpenses,
    BankBalance,
    Securities,
    RealEstateValue,
    BuildingSociety,
    LifeInsuranceValue,
    OtherAssets,
    PrimaryGoal,
    TargetAmount,
    TimeHorizon,
    GoalNotes,
    RiskClass,
    InvestmentExperience,
    LossTolerance,
}

/// Display/export-ready projection of one form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub control: FieldControl,
    pub value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    pub is_repeating: bool,
}

/// Resolve one field name against a profile snapshot.
///
/// Attempted in order, first match wins: exact dictionary lookup,
/// case-insensitive lookup, substring heuristics. Names that match no rule
/// resolve to an empty value instead of failing.
pub fn resolve_field(name: &str, store: &SectionStore) -> ResolvedField {
    let key = mapping::lookup_exact(name)
        .or_else(|| mapping::lookup_folded(name))
        .or_else(|| heuristics::infer(name));

    match key {
        Some(key) => ResolvedField {
            name: name.to_string(),
            label: controls::label_for(key).to_string(),
            control: controls::control_for(key),
            value: value_for(key, store),
            options: controls::options_for(key).to_vec(),
            is_repeating: false,
        },
        None => ResolvedField {
            name: name.to_string(),
            label: name.to_string(),
            control: FieldControl::Text,
            value: Value::Null,
            options: Vec::new(),
            is_repeating: false,
        },
    }
}

/// Resolve a template's scalar field list in one pass.
pub fn resolve_fields(names: &[String], store: &SectionStore) -> Vec<ResolvedField> {
    names.iter().map(|name| resolve_field(name, store)).collect()
}

/// Attributes of the repeating liabilities collection. Membership is a fixed
/// set: these names must render as a list of sub-records, never as a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiabilityField {
    LoanType,
    Lender,
    OriginalAmount,
    RemainingBalance,
    MonthlyPayment,
    InterestRate,
    EndDate,
}

const LOAN_TYPE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "mortgage", label: "Mortgage" },
    ChoiceOption { value: "consumerLoan", label: "Consumer loan" },
    ChoiceOption { value: "autoLoan", label: "Auto loan" },
    ChoiceOption { value: "studentLoan", label: "Student loan" },
    ChoiceOption { value: "overdraft", label: "Overdraft" },
];

impl LiabilityField {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::LoanType,
            Self::Lender,
            Self::OriginalAmount,
            Self::RemainingBalance,
            Self::MonthlyPayment,
            Self::InterestRate,
            Self::EndDate,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::LoanType => "loanType",
            Self::Lender => "lender",
            Self::OriginalAmount => "originalAmount",
            Self::RemainingBalance => "remainingBalance",
            Self::MonthlyPayment => "monthlyPayment",
            Self::InterestRate => "interestRate",
            Self::EndDate => "endDate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LoanType => "Loan type",
            Self::Lender => "Lender",
            Self::OriginalAmount => "Original amount",
            Self::RemainingBalance => "Remaining balance",
            Self::MonthlyPayment => "Monthly payment",
            Self::InterestRate => "Interest rate",
            Self::EndDate => "End date",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "loantype" | "loan_type" => Some(Self::LoanType),
            "lender" => Some(Self::Lender),
            "originalamount" | "original_amount" => Some(Self::OriginalAmount),
            "remainingbalance" | "remaining_balance" => Some(Self::RemainingBalance),
            "monthlypayment" | "monthly_payment" => Some(Self::MonthlyPayment),
            "interestrate" | "interest_rate" => Some(Self::InterestRate),
            "enddate" | "end_date" => Some(Self::EndDate),
            _ => None,
        }
    }

    const fn control(self) -> FieldControl {
        match self {
            Self::LoanType => FieldControl::Select,
            Self::Lender => FieldControl::Text,
            Self::OriginalAmount
            | Self::RemainingBalance
            | Self::MonthlyPayment
            | Self::InterestRate => FieldControl::Number,
            Self::EndDate => FieldControl::Date,
        }
    }

    fn value_from(self, entry: &Liability) -> Value {
        match self {
            Self::LoanType => text_value(entry.loan_type.as_deref()),
            Self::Lender => text_value(entry.lender.as_deref()),
            Self::OriginalAmount => amount_value(entry.original_amount),
            Self::RemainingBalance => amount_value(entry.remaining_balance),
            Self::MonthlyPayment => amount_value(entry.monthly_payment),
            Self::InterestRate => amount_value(entry.interest_rate),
            Self::EndDate => date_value(entry.end_date),
        }
    }
}

/// Whether a configured field name belongs to the repeating liabilities
/// collection.
pub fn is_liability_field(name: &str) -> bool {
    LiabilityField::from_key(name).is_some()
}

/// Resolve every liability entry independently: one `ResolvedField` per
/// liability attribute per entry, in entry order.
pub fn resolve_liabilities(store: &SectionStore) -> Vec<Vec<ResolvedField>> {
    store
        .liabilities
        .iter()
        .map(|entry| {
            LiabilityField::ordered()
                .into_iter()
                .map(|field| ResolvedField {
                    name: field.key().to_string(),
                    label: field.label().to_string(),
                    control: field.control(),
                    value: field.value_from(entry),
                    options: if field == LiabilityField::LoanType {
                        LOAN_TYPE_OPTIONS.to_vec()
                    } else {
                        Vec::new()
                    },
                    is_repeating: true,
                })
                .collect()
        })
        .collect()
}

fn text_value(raw: Option<&str>) -> Value {
    match raw {
        Some(text) if !text.trim().is_empty() => Value::String(text.to_string()),
        _ => Value::Null,
    }
}

fn amount_value(raw: Option<f64>) -> Value {
    raw.and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn date_value(raw: Option<NaiveDate>) -> Value {
    raw.map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
        .unwrap_or(Value::Null)
}

fn tax_class_value(raw: Option<u8>) -> Value {
    raw.map(|class| Value::String(class.to_string()))
        .unwrap_or(Value::Null)
}

fn value_for(key: FieldKey, store: &SectionStore) -> Value {
    let details = store.personal_details.as_ref();
    let employment = store.employment.as_ref();
    let income = store.income.as_ref();
    let expenses = store.expenses.as_ref();
    let assets = store.assets.as_ref();
    let goals = store.goals_and_wishes.as_ref();
    let risk = store.risk_appetite.as_ref();

    match key {
        FieldKey::FirstName => text_value(details.and_then(|d| d.first_name.as_deref())),
        FieldKey::LastName => text_value(details.and_then(|d| d.last_name.as_deref())),
        FieldKey::BirthDate => date_value(details.and_then(|d| d.birth_date)),
        FieldKey::Street => text_value(details.and_then(|d| d.street.as_deref())),
        FieldKey::HouseNumber => text_value(details.and_then(|d| d.house_number.as_deref())),
        FieldKey::PostalCode => text_value(details.and_then(|d| d.postal_code.as_deref())),
        FieldKey::City => text_value(details.and_then(|d| d.city.as_deref())),
        FieldKey::Email => text_value(details.and_then(|d| d.email.as_deref())),
        FieldKey::Phone => text_value(details.and_then(|d| d.phone.as_deref())),
        FieldKey::Nationality => text_value(details.and_then(|d| d.nationality.as_deref())),
        FieldKey::MaritalStatus => text_value(details.and_then(|d| d.marital_status.as_deref())),
        FieldKey::Occupation => text_value(employment.and_then(|e| e.occupation.as_deref())),
        FieldKey::Employer => text_value(employment.and_then(|e| e.employer.as_deref())),
        FieldKey::EmploymentStatus => {
            text_value(employment.and_then(|e| e.employment_status.as_deref()))
        }
        FieldKey::EmployedSince => date_value(employment.and_then(|e| e.employed_since)),
        FieldKey::GrossIncome => amount_value(income.and_then(|i| i.gross_income)),
        FieldKey::NetIncome => amount_value(income.and_then(|i| i.net_income)),
        FieldKey::TaxClass => tax_class_value(income.and_then(|i| i.tax_class)),
        FieldKey::ChildBenefit => amount_value(income.and_then(|i| i.child_benefit)),
        FieldKey::OtherIncome => amount_value(income.and_then(|i| i.other_income)),
        FieldKey::Rent => amount_value(expenses.and_then(|e| e.rent)),
        FieldKey::LivingExpenses => amount_value(expenses.and_then(|e| e.living_expenses)),
        FieldKey::InsurancePremiums => amount_value(expenses.and_then(|e| e.insurance_premiums)),
        FieldKey::SavingsRate => amount_value(expenses.and_then(|e| e.savings_rate)),
        FieldKey::OtherExpenses => amount_value(expenses.and_then(|e| e.other_expenses)),
        FieldKey::BankBalance => amount_value(assets.and_then(|a| a.bank_balance)),
        FieldKey::Securities => amount_value(assets.and_then(|a| a.securities)),
        FieldKey::RealEstateValue => amount_value(assets.and_then(|a| a.real_estate_value)),
        FieldKey::BuildingSociety => amount_value(assets.and_then(|a| a.building_society)),
        FieldKey::LifeInsuranceValue => amount_value(assets.and_then(|a| a.life_insurance_value)),
        FieldKey::OtherAssets => amount_value(assets.and_then(|a| a.other_assets)),
        FieldKey::PrimaryGoal => text_value(goals.and_then(|g| g.primary_goal.as_deref())),
        FieldKey::TargetAmount => amount_value(goals.and_then(|g| g.target_amount)),
        FieldKey::TimeHorizon => text_value(goals.and_then(|g| g.time_horizon.as_deref())),
        FieldKey::GoalNotes => text_value(goals.and_then(|g| g.goal_notes.as_deref())),
        FieldKey::RiskClass => text_value(risk.and_then(|r| r.risk_class.as_deref())),
        FieldKey::InvestmentExperience => {
            text_value(risk.and_then(|r| r.investment_experience.as_deref()))
        }
        FieldKey::LossTolerance => text_value(risk.and_then(|r| r.loss_tolerance.as_deref())),
    }
}
