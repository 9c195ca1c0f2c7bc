//! Form field value objects

use std::fmt;
use std::str::FromStr;

/// One entry of an enumerated option set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Token sent to the prediction service
    pub token: &'static str,
    /// Human-readable label
    pub label: &'static str,
}

const fn option(token: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { token, label }
}

const GENDER_OPTIONS: &[ChoiceOption] = &[option("M", "Male"), option("F", "Female")];

const CHEST_PAIN_OPTIONS: &[ChoiceOption] = &[
    option("ASY", "No pain"),
    option("NAP", "Mild pain"),
    option("TA", "Moderate pain"),
    option("ATA", "Severe pain"),
];

const FASTING_BS_OPTIONS: &[ChoiceOption] = &[option("1", "Yes"), option("0", "No")];

const RESTING_ECG_OPTIONS: &[ChoiceOption] = &[
    option("Normal", "Normal"),
    option("ST", "ST-T wave abnormality"),
    option("LVH", "Left ventricular hypertrophy"),
];

const YES_NO_OPTIONS: &[ChoiceOption] = &[option("Y", "Yes"), option("N", "No")];

const ST_SLOPE_OPTIONS: &[ChoiceOption] = &[
    option("Up", "Up"),
    option("Flat", "Flat"),
    option("Down", "Down"),
];

/// The twelve clinical inputs, in feature-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Age,
    Gender,
    ChestPain,
    BloodPressure,
    CholesterolLevel,
    FastingBs,
    RestingEcg,
    MaximumHr,
    ExerciseAngina,
    Oldpeak,
    StSlope,
    ZscoreChol,
}

impl FieldName {
    /// All fields, ordered by their position in the feature vector
    pub const ALL: [FieldName; 12] = [
        Self::Age,
        Self::Gender,
        Self::ChestPain,
        Self::BloodPressure,
        Self::CholesterolLevel,
        Self::FastingBs,
        Self::RestingEcg,
        Self::MaximumHr,
        Self::ExerciseAngina,
        Self::Oldpeak,
        Self::StSlope,
        Self::ZscoreChol,
    ];

    /// Position of this field in the feature vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used by the form and the service
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::ChestPain => "chestPain",
            Self::BloodPressure => "blood_pressure",
            Self::CholesterolLevel => "cholesterol_level",
            Self::FastingBs => "Fasting_BS",
            Self::RestingEcg => "Resting_ECG",
            Self::MaximumHr => "Maximum_HR",
            Self::ExerciseAngina => "exerciseAngina",
            Self::Oldpeak => "oldpeak",
            Self::StSlope => "st_slope",
            Self::ZscoreChol => "zscore_chol",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::ChestPain => "Chest pain type",
            Self::BloodPressure => "Resting blood pressure",
            Self::CholesterolLevel => "Cholesterol level",
            Self::FastingBs => "Fasting blood sugar > 120 mg/dl",
            Self::RestingEcg => "Resting ECG",
            Self::MaximumHr => "Maximum heart rate",
            Self::ExerciseAngina => "Exercise induced angina",
            Self::Oldpeak => "Oldpeak",
            Self::StSlope => "ST slope",
            Self::ZscoreChol => "Cholesterol z-score (optional)",
        }
    }

    /// Option set for enumerated fields, `None` for numeric ones
    pub fn options(self) -> Option<&'static [ChoiceOption]> {
        match self {
            Self::Gender => Some(GENDER_OPTIONS),
            Self::ChestPain => Some(CHEST_PAIN_OPTIONS),
            Self::FastingBs => Some(FASTING_BS_OPTIONS),
            Self::RestingEcg => Some(RESTING_ECG_OPTIONS),
            Self::ExerciseAngina => Some(YES_NO_OPTIONS),
            Self::StSlope => Some(ST_SLOPE_OPTIONS),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.options().is_none()
    }

    /// Only the cholesterol z-score can be derived by the service
    pub fn is_required(self) -> bool {
        !matches!(self, Self::ZscoreChol)
    }

    /// Numeric fields whose domain is the positive reals
    pub fn must_be_positive(self) -> bool {
        matches!(
            self,
            Self::Age | Self::BloodPressure | Self::CholesterolLevel | Self::MaximumHr
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.wire_name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Raw field value as entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free numeric text, parsed at submission time
    Numeric(String),
    /// Token from an enumerated set; empty while unset
    Token(String),
}

/// Outcome of the explicit parse step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedValue<'a> {
    Number(f64),
    Token(&'a str),
    Missing,
    NotANumber,
}

impl FieldValue {
    pub fn raw(&self) -> &str {
        match self {
            FieldValue::Numeric(s) | FieldValue::Token(s) => s,
        }
    }

    pub fn parse(&self) -> ParsedValue<'_> {
        match self {
            FieldValue::Numeric(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return ParsedValue::Missing;
                }
                match text.parse::<f64>() {
                    Ok(n) if n.is_finite() => ParsedValue::Number(n),
                    _ => ParsedValue::NotANumber,
                }
            }
            FieldValue::Token(token) if token.is_empty() => ParsedValue::Missing,
            FieldValue::Token(token) => ParsedValue::Token(token),
        }
    }
}

/// Why a field failed the completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Missing,
    NotANumber,
    NotPositive,
    NotAnOption,
}

/// A field that failed the completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidField {
    pub field: FieldName,
    pub issue: FieldIssue,
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issue {
            FieldIssue::Missing => write!(f, "{}: missing", self.field),
            FieldIssue::NotANumber => write!(f, "{}: not a number", self.field),
            FieldIssue::NotPositive => write!(f, "{}: must be positive", self.field),
            FieldIssue::NotAnOption => {
                let tokens: Vec<&str> = self
                    .field
                    .options()
                    .unwrap_or_default()
                    .iter()
                    .map(|o| o.token)
                    .collect();
                write!(f, "{}: not one of {}", self.field, tokens.join(", "))
            }
        }
    }
}

/// Represents a single form field with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: FieldName,
    pub value: FieldValue,
}

impl FormField {
    /// Create an unset field of the right kind for `name`
    pub fn new(name: FieldName) -> Self {
        let value = if name.is_numeric() {
            FieldValue::Numeric(String::new())
        } else {
            FieldValue::Token(String::new())
        };
        Self { name, value }
    }

    pub fn label(&self) -> &'static str {
        self.name.label()
    }

    pub fn raw(&self) -> &str {
        self.value.raw()
    }

    pub fn parse(&self) -> ParsedValue<'_> {
        self.value.parse()
    }

    /// Replace the raw value without validation
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        self.value = match self.value {
            FieldValue::Numeric(_) => FieldValue::Numeric(raw),
            FieldValue::Token(_) => FieldValue::Token(raw),
        };
    }

    /// Raw text after typing `c`; `None` when the field rejects it
    pub fn typed(&self, c: char) -> Option<String> {
        match &self.value {
            FieldValue::Numeric(s) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') => {
                Some(format!("{s}{c}"))
            }
            _ => None,
        }
    }

    /// Raw text after a backspace; a token field is cleared outright
    pub fn erased(&self) -> String {
        match &self.value {
            FieldValue::Numeric(s) => {
                let mut next = s.clone();
                next.pop();
                next
            }
            FieldValue::Token(_) => String::new(),
        }
    }

    /// The neighbouring option of a choice field, starting from unset
    pub fn stepped(&self, forward: bool) -> Option<&'static str> {
        let options = self.name.options()?;
        let len = options.len();
        let current = options.iter().position(|o| o.token == self.raw());
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        Some(options[next].token)
    }

    pub fn clear(&mut self) {
        self.set_raw(String::new());
    }

    /// The completeness check for this field, if it fails
    pub fn issue(&self) -> Option<FieldIssue> {
        match self.parse() {
            ParsedValue::Missing if self.name.is_required() => Some(FieldIssue::Missing),
            ParsedValue::Missing => None,
            // Unparsable z-score text falls back to "unset"
            ParsedValue::NotANumber if !self.name.is_required() => None,
            ParsedValue::NotANumber => Some(FieldIssue::NotANumber),
            ParsedValue::Number(n) if self.name.must_be_positive() && n <= 0.0 => {
                Some(FieldIssue::NotPositive)
            }
            ParsedValue::Number(_) => None,
            ParsedValue::Token(token) => {
                let known = self
                    .name
                    .options()
                    .is_some_and(|options| options.iter().any(|o| o.token == token));
                (!known).then_some(FieldIssue::NotAnOption)
            }
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match (&self.value, self.name.options()) {
            (FieldValue::Token(token), Some(options)) if !token.is_empty() => options
                .iter()
                .find(|o| o.token == token.as_str())
                .map(|o| format!("{} ({})", o.label, o.token))
                .unwrap_or_else(|| token.clone()),
            (FieldValue::Token(_), _) => String::new(),
            (FieldValue::Numeric(text), _) => text.clone(),
        }
    }
}
