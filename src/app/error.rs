//! Write failure types

use thiserror::Error;

use crate::backend::BackendError;

/// A visitor-triggered write that did not go through
///
/// The display text is what the visitor sees in the alert.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Kommentar konnte nicht gespeichert werden: {}", .0.user_message())]
    Comment(BackendError),

    #[error("Reaktion konnte nicht gespeichert werden: {}", .0.user_message())]
    Reaction(BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_texts() {
        let err = WriteError::Comment(BackendError::Api {
            status: 403,
            message: "new row violates row-level security policy".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Kommentar konnte nicht gespeichert werden: new row violates row-level security policy"
        );

        let err = WriteError::Reaction(BackendError::Rejected("offline".to_string()));
        assert_eq!(
            err.to_string(),
            "Reaktion konnte nicht gespeichert werden: offline"
        );
    }
}
