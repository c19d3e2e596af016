use crate::backend::BackendError;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Product-specific errors.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The submitted date does not match the gate constant.
    #[error("MAL GEI")]
    GateRejected,

    #[error("No image selected")]
    MissingImage,

    #[error("Title is required")]
    MissingTitle,

    #[error("Another submission is still in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Recovers the typed error the product actor boxed into the framework error.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(product_error) => *product_error,
                Err(other) => ProductError::ActorCommunicationError(other.to_string()),
            },
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }

    /// Whether the request was refused before any remote call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProductError::GateRejected
                | ProductError::MissingImage
                | ProductError::MissingTitle
                | ProductError::SubmissionInFlight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_message_is_exact() {
        assert_eq!(ProductError::GateRejected.to_string(), "MAL GEI");
    }

    #[test]
    fn test_from_framework_recovers_typed_error() {
        let recovered = ProductError::from_framework(FrameworkError::entity(ProductError::MissingImage));
        assert!(matches!(recovered, ProductError::MissingImage));

        let backend = ProductError::from_framework(FrameworkError::entity(ProductError::Backend(
            BackendError::NotFound("p1".into()),
        )));
        assert!(matches!(backend, ProductError::Backend(BackendError::NotFound(_))));
    }

    #[test]
    fn test_from_framework_channel_errors() {
        let closed = ProductError::from_framework(FrameworkError::ActorClosed);
        match closed {
            ProductError::ActorCommunicationError(msg) => assert_eq!(msg, "Actor closed"),
            other => panic!("expected ActorCommunicationError, got {other:?}"),
        }

        let foreign = ProductError::from_framework(FrameworkError::entity(std::io::Error::other("boom")));
        assert!(matches!(foreign, ProductError::ActorCommunicationError(msg) if msg == "boom"));
    }
}
