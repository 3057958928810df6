//! Request outcome shown by the presentation layer.
//!
//! One value per user action replaces separate loading, error and result flags. Serialised it
//! reads `{"status": "pending"}`, `{"status": "error", "message": ...}` or
//! `{"status": "ready", ...payload}`.

use serde::Serialize;

use crate::MbsResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T> {
    /// Submitted, not yet answered.
    Pending,
    Error {
        message: String,
    },
    Ready(T),
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> Outcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

impl<T> From<MbsResult<T>> for Outcome<T> {
    fn from(result: MbsResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Error {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MbsError;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Payload {
        total: f64,
    }

    #[test]
    fn defaults_to_pending() {
        let outcome: Outcome<Payload> = Outcome::default();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"status": "pending"})
        );
        assert!(!outcome.is_ready());
    }

    #[test]
    fn ready_payload_is_flattened_next_to_status() {
        let outcome = Outcome::from(Ok::<_, MbsError>(Payload { total: 119.1 }));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"status": "ready", "total": 119.1})
        );
        assert_eq!(outcome.ready(), Some(&Payload { total: 119.1 }));
    }

    #[test]
    fn errors_carry_the_user_message() {
        let outcome: Outcome<Payload> =
            Err(MbsError::InvalidInput("Please enter a search query.".into())).into();
        assert_eq!(outcome.error_message(), Some("Please enter a search query."));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"status": "error", "message": "Please enter a search query."})
        );
    }
}
