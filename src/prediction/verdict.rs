//! Verdict payload returned by the prediction service

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque structured verdict, kept exactly as the service sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verdict(Value);

impl Verdict {
    #[cfg(test)]
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    #[cfg(test)]
    pub fn payload(&self) -> &Value {
        &self.0
    }

    #[cfg(test)]
    pub fn into_payload(self) -> Value {
        self.0
    }

    /// The `prediction` entry rendered as text, whether numeric or string
    pub fn prediction(&self) -> Option<String> {
        match self.0.get("prediction")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Class probabilities, when present and all numeric
    pub fn probability(&self) -> Option<Vec<f64>> {
        self.0
            .get("probability")?
            .as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }

    /// Probability of the positive class (last entry)
    pub fn risk_probability(&self) -> Option<f64> {
        self.probability()?.last().copied()
    }

    /// The `error` message carried by JSON error bodies
    pub fn service_error(&self) -> Option<&str> {
        self.0.get("error")?.as_str()
    }

    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_prediction() {
        let verdict = Verdict::new(json!({"prediction": "low_risk"}));
        assert_eq!(verdict.prediction().as_deref(), Some("low_risk"));
        assert!(verdict.probability().is_none());
    }

    #[test]
    fn test_numeric_prediction_with_probability() {
        let verdict = Verdict::new(json!({"prediction": 1, "probability": [0.25, 0.75]}));
        assert_eq!(verdict.prediction().as_deref(), Some("1"));
        assert_eq!(verdict.probability(), Some(vec![0.25, 0.75]));
        assert_eq!(verdict.risk_probability(), Some(0.75));
    }

    #[test]
    fn test_non_numeric_probability_is_ignored() {
        let verdict = Verdict::new(json!({"probability": [0.1, "x"]}));
        assert!(verdict.probability().is_none());
        assert!(verdict.prediction().is_none());
    }

    #[test]
    fn test_service_error() {
        let verdict = Verdict::new(json!({"error": "Input data contains NaN values"}));
        assert_eq!(verdict.service_error(), Some("Input data contains NaN values"));
    }

    #[test]
    fn test_deserialize_keeps_payload_unmodified() {
        let body = r#"{"prediction":"low_risk","extra":{"model":"v2"}}"#;
        let verdict: Verdict = serde_json::from_str(body).unwrap();
        assert_eq!(
            verdict.into_payload(),
            json!({"prediction": "low_risk", "extra": {"model": "v2"}})
        );
    }
}
