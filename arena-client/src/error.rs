//! Error types for the arena client

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(#[from] tonic::transport::Error),

    #[error("RPC failed: {0}")]
    RpcError(#[from] tonic::Status),

    #[error("Server returned invalid data: {0}")]
    InvalidData(String),

    #[error("Battle response carries no payload this client knows")]
    UnknownPayload,

    #[error("Battle stream send half is closed")]
    ChannelClosed,

    #[error("Round {round} still pending after {attempts} poll attempts")]
    PollLimitExceeded { round: u32, attempts: u32 },

    #[error("{step} failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: Box<ClientError>,
    },

    #[error("Mock response not configured for: {0}")]
    NotConfigured(String),
}

impl ClientError {
    /// Tag this error with the match step it aborted.
    pub fn during(self, step: &'static str) -> Self {
        ClientError::Step {
            step,
            source: Box::new(self),
        }
    }

    /// The error underneath any step tags.
    pub fn root(&self) -> &ClientError {
        match self {
            ClientError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Transport could not be established at all; nothing of the match ran.
    pub fn is_connection(&self) -> bool {
        matches!(
            self.root(),
            ClientError::InvalidAddress(_) | ClientError::ConnectionFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_message_names_the_failed_step() {
        let err = ClientError::RpcError(tonic::Status::unavailable("arena down"))
            .during("registration");
        let message = err.to_string();
        assert!(message.starts_with("registration failed: RPC failed:"));
        assert!(message.contains("arena down"));
    }

    #[test]
    fn test_root_unwraps_nested_steps() {
        let err = ClientError::ChannelClosed.during("send move").during("battle");
        assert!(matches!(err.root(), ClientError::ChannelClosed));
        assert!(!err.is_connection());
    }

    #[test]
    fn test_invalid_address_is_a_connection_error() {
        let err = ClientError::InvalidAddress("bad uri".to_string()).during("connect");
        assert!(err.is_connection());
    }
}
