use async_trait::async_trait;
use crate::core::library::{ErrorCode, LibraryError};

#[derive(Debug)]
pub enum CommandError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        code: ErrorCode,
        message: String,
    },
    NotFound {
        code: ErrorCode,
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Storage {
        message: String,
        reason_code: Option<String>,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    // error_code picks the coded failure reported to the client
    pub fn error_code(&self) -> ErrorCode {
        match self {
            CommandError::Database { retryable, .. } | CommandError::Runtime { retryable, .. } => {
                if *retryable { ErrorCode::ServiceUnavailable } else { ErrorCode::InternalError }
            }
            CommandError::DuplicateKey { code, .. } => { *code }
            CommandError::NotFound { code, .. } => { *code }
            CommandError::Serialization { .. } => { ErrorCode::InvalidRequest }
            CommandError::Storage { .. } => { ErrorCode::StorageFailure }
            CommandError::Validation { .. } => { ErrorCode::InvalidRequest }
            CommandError::Other { .. } => { ErrorCode::InternalError }
        }
    }

    // detail is the message shown to clients for request-shaped failures
    pub fn detail(&self) -> Option<&str> {
        match self {
            CommandError::Serialization { message } => { Some(message.as_str()) }
            CommandError::Validation { message, .. } => { Some(message.as_str()) }
            _ => { None }
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::DuplicateKey { code, message } => {
                CommandError::DuplicateKey { code, message }
            }
            LibraryError::NotFound { code, message } => {
                CommandError::NotFound { code, message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Storage { message, reason_code } => {
                CommandError::Storage { message, reason_code }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}
