use serde::{Deserialize, Serialize};

/// Final-step consent input as captured by the signature control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentInput {
    pub place: String,
    pub agreed: bool,
    pub signature: String,
}

/// All three conditions are mandatory. Reasons are mutually exclusive and
/// checked in the fixed order place, agreement, signature so the first
/// violated condition is reported even when several are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsentRejection {
    #[error("place of signature is required")]
    PlaceRequired,
    #[error("consent must be granted")]
    ConsentRequired,
    #[error("signature is required")]
    SignatureRequired,
}

impl ConsentRejection {
    pub const fn code(self) -> &'static str {
        match self {
            ConsentRejection::PlaceRequired => "PlaceRequired",
            ConsentRejection::ConsentRequired => "ConsentRequired",
            ConsentRejection::SignatureRequired => "SignatureRequired",
        }
    }
}

pub struct ConsentCapture;

impl ConsentCapture {
    pub fn validate(input: &ConsentInput) -> Result<(), ConsentRejection> {
        if input.place.trim().is_empty() {
            return Err(ConsentRejection::PlaceRequired);
        }
        if !input.agreed {
            return Err(ConsentRejection::ConsentRequired);
        }
        if input.signature.trim().is_empty() {
            return Err(ConsentRejection::SignatureRequired);
        }
        Ok(())
    }
}
