//! Feature vector construction
//!
//! Maps the raw form to the twelve-position vector the prediction service
//! expects. Building is total: malformed numeric text becomes NaN and is left
//! for the completeness check to reject, except at the z-score position,
//! which is always normalized to [`FeatureValue::Unset`].

use crate::state::{FieldName, FormState, ParsedValue};
use serde::{Serialize, Serializer};

/// Number of positions in a feature vector
pub const FEATURE_COUNT: usize = 12;

/// Population mean used by the service to derive a missing z-score
pub const CHOLESTEROL_MEAN: f64 = 246.26;
/// Population standard deviation used by the service to derive a missing z-score
pub const CHOLESTEROL_STD: f64 = 51.83;

/// A single position of the feature vector
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// Parsed real; NaN when the text was empty or malformed
    Number(f64),
    /// Categorical token, passed through unchanged
    Token(String),
    /// Boolean encoded as 0 or 1
    Flag(u8),
    /// No value supplied; the service derives it
    Unset,
}

impl FeatureValue {
    pub fn is_nan(&self) -> bool {
        matches!(self, FeatureValue::Number(n) if n.is_nan())
    }

    #[cfg(test)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            FeatureValue::Token(t) => Some(t),
            _ => None,
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // serde_json writes non-finite floats as null
            FeatureValue::Number(n) => serializer.serialize_f64(*n),
            FeatureValue::Token(t) => serializer.serialize_str(t),
            FeatureValue::Flag(b) => serializer.serialize_u8(*b),
            FeatureValue::Unset => serializer.serialize_none(),
        }
    }
}

/// Ordered snapshot of one case, serialized as a JSON array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([FeatureValue; FEATURE_COUNT]);

impl FeatureVector {
    #[cfg(test)]
    pub fn get(&self, field: FieldName) -> &FeatureValue {
        &self.0[field.index()]
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[FeatureValue] {
        &self.0
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the feature vector for the current form contents
pub fn build_feature_vector(form: &FormState) -> FeatureVector {
    let number = |name: FieldName| match form.field(name).parse() {
        ParsedValue::Number(n) => FeatureValue::Number(n),
        _ => FeatureValue::Number(f64::NAN),
    };
    let token = |name: FieldName| FeatureValue::Token(form.raw(name).to_string());

    let fasting = if form.raw(FieldName::FastingBs) == "1" {
        FeatureValue::Flag(1)
    } else {
        FeatureValue::Flag(0)
    };

    let zscore = match number(FieldName::ZscoreChol) {
        value if value.is_nan() => FeatureValue::Unset,
        value => value,
    };

    FeatureVector([
        number(FieldName::Age),
        token(FieldName::Gender),
        token(FieldName::ChestPain),
        number(FieldName::BloodPressure),
        number(FieldName::CholesterolLevel),
        fasting,
        token(FieldName::RestingEcg),
        number(FieldName::MaximumHr),
        token(FieldName::ExerciseAngina),
        number(FieldName::Oldpeak),
        token(FieldName::StSlope),
        zscore,
    ])
}

/// The z-score the service will derive from a raw cholesterol level
pub fn derived_zscore(cholesterol: f64) -> f64 {
    (cholesterol - CHOLESTEROL_MEAN) / CHOLESTEROL_STD
}

/// Preview of the derived z-score, shown while the optional field is blank
pub fn zscore_preview(form: &FormState) -> Option<f64> {
    match form.field(FieldName::CholesterolLevel).parse() {
        ParsedValue::Number(n) => Some(derived_zscore(n)),
        _ => None,
    }
}
