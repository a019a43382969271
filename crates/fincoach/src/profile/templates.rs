use std::collections::HashMap;
use std::io::Read;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::domain::SectionKey;

/// One step of a wizard flow: a profile section or the final consent page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Section(SectionKey),
    Consent,
}

impl WizardStep {
    pub const fn key(self) -> &'static str {
        match self {
            WizardStep::Section(section) => section.key(),
            WizardStep::Consent => "consent",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::Section(section) => section.label(),
            WizardStep::Consent => "Consent & Signature",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("consent") {
            return Some(WizardStep::Consent);
        }
        SectionKey::from_key(raw).map(WizardStep::Section)
    }
}

impl Serialize for WizardStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for WizardStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WizardStep::from_key(&raw)
            .ok_or_else(|| D::Error::custom(format!("unknown wizard step '{raw}'")))
    }
}

/// Configuration describing which steps a product application requires.
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub form_type: String,
    pub required: Vec<WizardStep>,
    pub consent_text: String,
}

impl FormTemplate {
    /// The generic onboarding wizard: all eight sections, no consent page.
    pub fn full_profile() -> Self {
        Self {
            form_type: "profil".to_string(),
            required: SectionKey::ordered()
                .into_iter()
                .map(WizardStep::Section)
                .collect(),
            consent_text: String::new(),
        }
    }

    pub fn step_count(&self) -> usize {
        self.required.len()
    }

    pub fn requires_consent(&self) -> bool {
        self.required.contains(&WizardStep::Consent)
    }

    /// Structural invariants: `required` is non-empty and `consent`, when
    /// present, is the last element.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.form_type.trim().is_empty() {
            return Err(TemplateError::Invalid(
                "form template is missing a form type".to_string(),
            ));
        }
        if self.required.is_empty() {
            return Err(TemplateError::Invalid(format!(
                "form template '{}' has no required steps",
                self.form_type
            )));
        }

        let last = self.required.len() - 1;
        for (index, step) in self.required.iter().enumerate() {
            if *step == WizardStep::Consent && index != last {
                return Err(TemplateError::Invalid(format!(
                    "form template '{}' places consent before the final step",
                    self.form_type
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("no form template registered for type '{0}'")]
    UnknownFormType(String),
    #[error("invalid form template configuration: {0}")]
    Invalid(String),
    #[error("could not parse form template configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static registry of product form templates, keyed by form type.
#[derive(Debug, Clone, Default)]
pub struct FormTemplateCatalog {
    templates: HashMap<String, FormTemplate>,
}

impl FormTemplateCatalog {
    /// The templates the portal ships with.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for template in builtin_templates() {
            catalog
                .insert(template)
                .expect("builtin templates are well-formed");
        }
        catalog
    }

    /// Overlay templates from a JSON document: an array of objects with an
    /// ordered `required` array and a `consentText` string.
    pub fn load_overlay<R: Read>(&mut self, reader: R) -> Result<usize, TemplateError> {
        let templates: Vec<FormTemplate> = serde_json::from_reader(reader)?;
        let count = templates.len();
        for template in templates {
            self.insert(template)?;
        }
        Ok(count)
    }

    pub fn insert(&mut self, template: FormTemplate) -> Result<(), TemplateError> {
        template.validate()?;
        self.templates.insert(template.form_type.clone(), template);
        Ok(())
    }

    /// Exact-key lookup. Unknown product types are reported explicitly so
    /// callers can defer to a generic listing instead of failing hard.
    pub fn get(&self, form_type: &str) -> Result<&FormTemplate, TemplateError> {
        self.templates
            .get(form_type)
            .ok_or_else(|| TemplateError::UnknownFormType(form_type.to_string()))
    }

    pub fn form_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

fn builtin_templates() -> Vec<FormTemplate> {
    vec![
        FormTemplate {
            form_type: "immobilien".to_string(),
            required: vec![
                WizardStep::Section(SectionKey::PersonalDetails),
                WizardStep::Section(SectionKey::Employment),
                WizardStep::Section(SectionKey::Income),
                WizardStep::Section(SectionKey::Expenses),
                WizardStep::Section(SectionKey::Liabilities),
                WizardStep::Consent,
            ],
            consent_text: "I authorize the coach to forward my profile data to the \
                           selected financing partners for a real-estate offer."
                .to_string(),
        },
        FormTemplate {
            form_type: "altersvorsorge".to_string(),
            required: vec![
                WizardStep::Section(SectionKey::PersonalDetails),
                WizardStep::Section(SectionKey::Employment),
                WizardStep::Section(SectionKey::Income),
                WizardStep::Section(SectionKey::Assets),
                WizardStep::Section(SectionKey::GoalsAndWishes),
                WizardStep::Section(SectionKey::RiskAppetite),
                WizardStep::Consent,
            ],
            consent_text: "I agree that my profile data may be used to prepare a \
                           retirement provision recommendation."
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn builtin_catalog_resolves_known_product_types() {
        let catalog = FormTemplateCatalog::builtin();
        let template = catalog.get("immobilien").expect("immobilien registered");
        assert_eq!(template.step_count(), 6);
        assert!(template.requires_consent());
        assert_eq!(template.required.last(), Some(&WizardStep::Consent));
    }

    #[test]
    fn unknown_form_type_is_an_explicit_signal() {
        let catalog = FormTemplateCatalog::builtin();
        let error = catalog.get("bausparen").expect_err("unknown type");
        assert!(matches!(error, TemplateError::UnknownFormType(_)));
    }

    #[test]
    fn consent_must_be_last() {
        let template = FormTemplate {
            form_type: "broken".to_string(),
            required: vec![
                WizardStep::Consent,
                WizardStep::Section(SectionKey::Income),
            ],
            consent_text: String::new(),
        };
        assert!(matches!(
            template.validate(),
            Err(TemplateError::Invalid(_))
        ));
    }

    #[test]
    fn empty_required_list_is_rejected() {
        let template = FormTemplate {
            form_type: "empty".to_string(),
            required: Vec::new(),
            consent_text: String::new(),
        };
        assert!(template.validate().is_err());
    }

    #[test]
    fn overlay_parses_the_configuration_contract() {
        let raw = r#"[
            {
                "formType": "baufinanzierung",
                "required": ["personal_details", "income", "liabilities", "consent"],
                "consentText": "Weitergabe an Finanzierungspartner."
            }
        ]"#;

        let mut catalog = FormTemplateCatalog::builtin();
        let added = catalog
            .load_overlay(Cursor::new(raw))
            .expect("overlay loads");
        assert_eq!(added, 1);

        let template = catalog.get("baufinanzierung").expect("registered");
        assert_eq!(
            template.required.first(),
            Some(&WizardStep::Section(SectionKey::PersonalDetails))
        );
        assert_eq!(template.required.last(), Some(&WizardStep::Consent));
    }

    #[test]
    fn full_profile_covers_every_section_in_order() {
        let template = FormTemplate::full_profile();
        assert_eq!(template.step_count(), 8);
        assert!(!template.requires_consent());
        assert_eq!(
            template.required[0],
            WizardStep::Section(SectionKey::PersonalDetails)
        );
    }
}
