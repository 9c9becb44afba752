//! Controller errors

use eventmart_api_client::ApiError;
use eventmart_core::validation::FieldErrors;
use eventmart_session::SessionError;
use thiserror::Error;

/// Why a controller action did not complete
#[derive(Error, Debug)]
pub enum PortalError {
    /// Client-side validation failed; nothing was sent
    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),

    /// The backend call failed; the message is user-facing
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session marker could not be written or cleared
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The action does not apply in the controller's current state
    #[error("{0}")]
    State(&'static str),
}

impl PortalError {
    /// Field errors, when validation failed
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<PortalError> for eventmart_core::Error {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Invalid(errors) => {
                let detail = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                eventmart_core::Error::validation(detail)
            }
            PortalError::Api(e) => eventmart_core::Error::new(
                eventmart_core::ErrorCode::BackendRejected,
                e.message().to_string(),
            ),
            PortalError::Session(e) => e.into(),
            PortalError::State(message) => {
                eventmart_core::Error::new(eventmart_core::ErrorCode::InvalidInput, message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
