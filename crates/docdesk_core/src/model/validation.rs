//! Field validation rules for document title/description.
//!
//! # Responsibility
//! - Declare length bounds for every editable document field.
//! - Produce per-field results with the first violated rule and its message.
//!
//! # Invariants
//! - Values are trimmed before any rule is evaluated.
//! - Rule order is `Required`, then `TooShort`, then `TooLong`.
//! - Lengths count Unicode scalar values, not bytes.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum trimmed title length.
pub const TITLE_MIN_CHARS: usize = 5;
/// Maximum trimmed title length.
pub const TITLE_MAX_CHARS: usize = 30;
/// Minimum trimmed description length.
pub const DESCRIPTION_MIN_CHARS: usize = 10;
/// Maximum trimmed description length.
pub const DESCRIPTION_MAX_CHARS: usize = 120;

/// Editable document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
}

impl Field {
    /// Human-readable label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
        }
    }

    fn bounds(self) -> (usize, usize) {
        match self {
            Self::Title => (TITLE_MIN_CHARS, TITLE_MAX_CHARS),
            Self::Description => (DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS),
        }
    }
}

/// Rule violated by one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value is empty after trim.
    Required,
    /// Trimmed value is shorter than `min` characters.
    TooShort { min: usize },
    /// Trimmed value is longer than `max` characters.
    TooLong { max: usize },
}

/// First violated rule for one field, with its display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub rule: Rule,
}

impl FieldError {
    /// Message shown under the form field.
    pub fn message(&self) -> String {
        let label = self.field.label();
        match self.rule {
            Rule::Required => format!("{label} is not allowed to be empty"),
            Rule::TooShort { min } => {
                format!("{label} length must be at least {min} characters long")
            }
            Rule::TooLong { max } => format!(
                "{label} length must be less than or equal to {max} characters long"
            ),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Raw title/description pair as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    pub title: String,
    pub description: String,
}

impl DocumentFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns a copy with both values trimmed.
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Per-field validation outcome. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub title: Option<FieldError>,
    pub description: Option<FieldError>,
}

impl ValidationResult {
    /// True when no field carries an error.
    pub fn is_valid(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Error for one field, if any.
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Title => self.title.as_ref(),
            Field::Description => self.description.as_ref(),
        }
    }

    /// Iterates all field errors in form order.
    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        self.title.iter().chain(self.description.iter())
    }

    /// Converts into `Ok(())` or a submission-blocking error.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationError { result: self })
        }
    }
}

/// Submission was blocked by at least one field error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub result: ValidationResult,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .result
            .errors()
            .map(FieldError::message)
            .collect::<Vec<_>>();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl Error for ValidationError {}

/// Validates a single field value against its rules.
pub fn validate_field(field: Field, value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    let (min, max) = field.bounds();
    let length = trimmed.chars().count();

    let rule = if trimmed.is_empty() {
        Rule::Required
    } else if length < min {
        Rule::TooShort { min }
    } else if length > max {
        Rule::TooLong { max }
    } else {
        return None;
    };

    Some(FieldError { field, rule })
}

/// Validates both document fields.
pub fn validate(fields: &DocumentFields) -> ValidationResult {
    ValidationResult {
        title: validate_field(Field::Title, &fields.title),
        description: validate_field(Field::Description, &fields.description),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate, validate_field, DocumentFields, Field, Rule};

    #[test]
    fn whitespace_only_title_is_required_not_too_short() {
        let err = validate_field(Field::Title, "    ").expect("blank title must fail");
        assert_eq!(err.rule, Rule::Required);
        assert_eq!(err.message(), "Title is not allowed to be empty");
    }

    #[test]
    fn bounds_are_measured_after_trim() {
        assert!(validate_field(Field::Title, "  abcde  ").is_none());
        let err = validate_field(Field::Title, "  abcd  ").expect("4 chars is too short");
        assert_eq!(err.rule, Rule::TooShort { min: 5 });
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(validate_field(Field::Title, "ééééé").is_none());
    }

    #[test]
    fn too_long_description_message_mentions_limit() {
        let long = "x".repeat(121);
        let err = validate_field(Field::Description, &long).expect("121 chars is too long");
        assert_eq!(
            err.message(),
            "Description length must be less than or equal to 120 characters long"
        );
    }

    #[test]
    fn into_result_lists_every_message() {
        let err = validate(&DocumentFields::new("", "short"))
            .into_result()
            .expect_err("both fields invalid");
        let text = err.to_string();
        assert!(text.contains("Title is not allowed to be empty"));
        assert!(text.contains("Description length must be at least 10"));
    }
}
