use crate::handler::{Error, ErrorKind};
use crate::service::ActionError;

impl From<ActionError> for Error<'static> {
    fn from(error: ActionError) -> Self {
        match &error {
            ActionError::InvalidEndpoint(_) => ErrorKind::BadRequest
                .with_message("Invalid database URL")
                .with_resource("database_url")
                .with_context(error.to_string()),
            ActionError::Enumeration { endpoint, .. } => ErrorKind::BadGateway
                .with_message("Failed to list collections")
                .with_resource(endpoint.to_string())
                .with_context(error.to_string()),
            ActionError::Heartbeat { endpoint, .. } => ErrorKind::BadGateway
                .with_message("The vector store did not answer")
                .with_resource(endpoint.to_string())
                .with_context(error.to_string()),
        }
    }
}
