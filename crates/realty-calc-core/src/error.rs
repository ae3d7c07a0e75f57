use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Input failed a field-level constraint before any computation ran.
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Input passed field checks but breaks a cross-field business rule.
    #[error("Rule violation: {field}: {reason}")]
    DomainRule { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    /// An intermediate value left the range a `Decimal` can hold.
    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CalcError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        CalcError::Overflow {
            context: context.into(),
        }
    }

    pub(crate) fn rule(field: &str, reason: impl Into<String>) -> Self {
        CalcError::DomainRule {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The human-readable message a caller shows to the end user.
    pub fn reason(&self) -> String {
        match self {
            CalcError::InvalidInput { reason, .. } | CalcError::DomainRule { reason, .. } => {
                reason.clone()
            }
            CalcError::DivisionByZero { context } => format!("0으로 나눌 수 없습니다 ({context})"),
            CalcError::Overflow { context } => {
                format!("계산 가능한 범위를 벗어난 입력입니다 ({context})")
            }
            CalcError::DateError(msg) | CalcError::SerializationError(msg) => msg.clone(),
        }
    }

    /// Field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::DomainRule { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_returns_user_message() {
        let err = CalcError::invalid("purchase_price", "매매가는 0보다 커야 합니다.");
        assert_eq!(err.reason(), "매매가는 0보다 커야 합니다.");
        assert_eq!(err.field(), Some("purchase_price"));
        assert_eq!(
            err.to_string(),
            "Invalid input: purchase_price: 매매가는 0보다 커야 합니다."
        );
    }

    #[test]
    fn test_overflow_has_no_field() {
        let err = CalcError::overflow("compound factor");
        assert_eq!(err.field(), None);
        assert_eq!(err.reason(), "계산 가능한 범위를 벗어난 입력입니다 (compound factor)");
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: CalcError = parse.unwrap_err().into();
        assert!(matches!(err, CalcError::SerializationError(_)));
        assert_eq!(err.field(), None);
    }
}
