use super::FieldKey;

/// Ordered pattern fallbacks, first match wins. Each rule fires when every
/// listed token appears in the lowercased field name, so `dateOfBirth`,
/// `birth_date`, and `geburtsdatum`-style aliases configured upstream can
/// still land on the right attribute. Order matters: address-shaped rules
/// sit above the `rent` rule because names like `currentAddress` contain
/// the substring `rent`.
const PATTERN_RULES: &[(&[&str], FieldKey)] = &[
    (&["first", "name"], FieldKey::FirstName),
    (&["last", "name"], FieldKey::LastName),
    (&["sur", "name"], FieldKey::LastName),
    (&["birth"], FieldKey::BirthDate),
    (&["address"], FieldKey::Street),
    (&["street"], FieldKey::Street),
    (&["postal"], FieldKey::PostalCode),
    (&["zip"], FieldKey::PostalCode),
    (&["city"], FieldKey::City),
    (&["mail"], FieldKey::Email),
    (&["phone"], FieldKey::Phone),
    (&["marital"], FieldKey::MaritalStatus),
    (&["employer"], FieldKey::Employer),
    (&["occupation"], FieldKey::Occupation),
    (&["profession"], FieldKey::Occupation),
    (&["gross"], FieldKey::GrossIncome),
    (&["net", "income"], FieldKey::NetIncome),
    (&["tax"], FieldKey::TaxClass),
    (&["insurance"], FieldKey::InsurancePremiums),
    (&["savings"], FieldKey::SavingsRate),
    (&["rent"], FieldKey::Rent),
    (&["securities"], FieldKey::Securities),
    (&["estate"], FieldKey::RealEstateValue),
    (&["goal"], FieldKey::PrimaryGoal),
    (&["horizon"], FieldKey::TimeHorizon),
    (&["risk"], FieldKey::RiskClass),
    (&["experience"], FieldKey::InvestmentExperience),
];

pub(crate) fn infer(name: &str) -> Option<FieldKey> {
    let folded = name.to_ascii_lowercase();
    PATTERN_RULES
        .iter()
        .find(|(tokens, _)| tokens.iter().all(|token| folded.contains(token)))
        .map(|(_, key)| *key)
}
