//! Range checks applied to form input before it reaches the store.

use crate::error::ValidationError;

/// Value under validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Text(&'a str),
    Number(i64),
}

/// A value plus the constraints it must satisfy.
///
/// Length constraints apply to text only and numeric bounds to numbers only.
/// All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validatable<'a> {
    pub value: Value<'a>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl<'a> Validatable<'a> {
    pub fn text(value: &'a str) -> Self {
        Self::with_value(Value::Text(value))
    }

    pub fn number(value: i64) -> Self {
        Self::with_value(Value::Number(value))
    }

    fn with_value(value: Value<'a>) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Check every constraint, reporting the first one violated
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.value {
            Value::Text(text) => {
                let trimmed = text.trim();
                if self.required && trimmed.is_empty() {
                    return Err(ValidationError::Required);
                }
                let actual = trimmed.chars().count();
                if let Some(min) = self.min_length {
                    if actual < min {
                        return Err(ValidationError::TooShort { min, actual });
                    }
                }
                if let Some(max) = self.max_length {
                    if actual > max {
                        return Err(ValidationError::TooLong { max, actual });
                    }
                }
            }
            Value::Number(actual) => {
                if let Some(min) = self.min {
                    if actual < min {
                        return Err(ValidationError::BelowMinimum { min, actual });
                    }
                }
                if let Some(max) = self.max {
                    if actual > max {
                        return Err(ValidationError::AboveMaximum { max, actual });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Parse a required whole number, e.g. the people count
pub fn parse_number(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))
}
