//! The single point where outcomes become envelopes.
//!
//! Validation failures carry their own user-facing message. Missing
//! documents become "<Entity> not found". Storage failures are logged with
//! their detail and answered with the operation's generic message; the
//! detail is attached only when the caller may see it.

use blog_core::responses::Envelope;
use blog_db::error::ServiceError;

use crate::dispatch::Operation;
use crate::handlers::Reply;
use crate::method::Method;

pub fn success(reply: Reply) -> Envelope {
    tracing::info!(message = %reply.message, "request succeeded");
    Envelope::success(reply.message, reply.data)
}

pub fn failure(operation: &Operation, error: ServiceError, show_detail: bool) -> Envelope {
    match error {
        ServiceError::Validation(message) => {
            tracing::debug!(?operation, %message, "request rejected");
            Envelope::failure(message, None)
        }
        ServiceError::NotFound { entity, id } => {
            tracing::debug!(?operation, entity, %id, "document not found");
            Envelope::failure(format!("{entity} not found"), None)
        }
        ServiceError::Storage(error) => {
            let message = operation.failure_message();
            tracing::error!(?operation, %error, "{message}");
            Envelope::failure(message, show_detail.then(|| error.to_string()))
        }
    }
}

pub fn unsupported(path: &str, method: Method) -> Envelope {
    let message = format!("{path} does not support {method}");
    tracing::warn!("{message}");
    Envelope::failure(message, None)
}

pub fn unauthorized(operation: &Operation) -> Envelope {
    tracing::warn!(?operation, "unauthorized request");
    Envelope::failure("unauthorized", None)
}
