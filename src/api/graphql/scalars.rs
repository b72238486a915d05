//! Custom scalars. Variables and inline literals both arrive here as a
//! `Value`, so each scalar has a single parse path through `validation::rules`.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, Utc};

use crate::validation::rules::{canonical_date, validate_date, validate_email, validate_password};

/// It represents a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub DateTime<Utc>);

#[Scalar(name = "DateType")]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        let raw = match &value {
            Value::String(raw) => raw.clone(),
            Value::Number(number) if number.is_i64() || number.is_u64() => number.to_string(),
            _ => return Err(InputValueError::expected_type(value)),
        };
        Ok(Date(validate_date(&raw)?))
    }

    fn to_value(&self) -> Value {
        Value::String(canonical_date(&self.0))
    }
}

/// It is for email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(pub String);

impl Email {
    /// Runs the email rule over a stored value on its way out.
    pub fn from_stored(raw: &str) -> Result<Self, crate::validation::rules::ValidationError> {
        validate_email(raw).map(|email| Email(email.to_string()))
    }
}

#[Scalar(name = "EmailType")]
impl ScalarType for Email {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(raw) => Ok(Email(validate_email(raw)?.to_string())),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

/// It is for strong password: 6-16 letters, digits or `!@#$%^&*`, with at
/// least one digit and one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(pub String);

#[Scalar(name = "PasswordType")]
impl ScalarType for Password {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(raw) => Ok(Password(validate_password(raw)?.to_string())),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}
