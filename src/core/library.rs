use std::fmt;
use std::fmt::{Display, Formatter};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

// ErrorCode enumerates coded failures that are reported to API clients as-is
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BookAlreadyExists,
    BookNotFound,
    UserAlreadyExists,
    UserNotFound,
    InvalidRequest,
    StorageFailure,
    ServiceUnavailable,
    InternalError,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::BookAlreadyExists => "BOOK4001",
            ErrorCode::BookNotFound => "BOOK4040",
            ErrorCode::UserAlreadyExists => "USER4001",
            ErrorCode::UserNotFound => "USER4040",
            ErrorCode::InvalidRequest => "REQ4000",
            ErrorCode::StorageFailure => "STORAGE5000",
            ErrorCode::ServiceUnavailable => "SERVER5030",
            ErrorCode::InternalError => "SERVER5000",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::BookAlreadyExists => "Book already exists.",
            ErrorCode::BookNotFound => "Book does not exist.",
            ErrorCode::UserAlreadyExists => "Username is already taken.",
            ErrorCode::UserNotFound => "User does not exist.",
            ErrorCode::InvalidRequest => "Invalid request.",
            ErrorCode::StorageFailure => "Failed to store file.",
            ErrorCode::ServiceUnavailable => "Service is temporarily unavailable.",
            ErrorCode::InternalError => "Internal server error.",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::BookAlreadyExists => StatusCode::BAD_REQUEST,
            ErrorCode::BookNotFound => StatusCode::NOT_FOUND,
            ErrorCode::UserAlreadyExists => StatusCode::BAD_REQUEST,
            ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug)]
pub enum LibraryError {
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
    // This is a retry-able error, which indicates that the store or storage backend is throttling
    // or temporarily unreachable. The caller can retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Storage {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(code: ErrorCode, message: &str) -> LibraryError {
        LibraryError::DuplicateKey { code, message: message.to_string() }
    }

    pub fn not_found(code: ErrorCode, message: &str) -> LibraryError {
        LibraryError::NotFound { code, message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn storage(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Storage { message: message.to_string(), reason_code }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Storage { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl From<config::ConfigError> for LibraryError {
    fn from(err: config::ConfigError) -> Self {
        LibraryError::validation(
            format!("invalid configuration {}", err).as_str(), Some("Configuration".to_string()))
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::DuplicateKey { code, message } => {
                write!(f, "{} {}", code, message)
            }
            LibraryError::NotFound { code, message } => {
                write!(f, "{} {}", code, message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Storage { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for Repository .
pub type LibraryResult<T> = Result<T, LibraryError>;

// Category tags a book; a book carries zero or more of them
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Novel,
    Essay,
    Poetry,
    Humanities,
    SocialScience,
    Science,
    Technology,
    Art,
    History,
    Children,
    SelfHelp,
    Economy,
}

impl Category {
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "NOVEL" => Some(Category::Novel),
            "ESSAY" => Some(Category::Essay),
            "POETRY" => Some(Category::Poetry),
            "HUMANITIES" => Some(Category::Humanities),
            "SOCIAL_SCIENCE" => Some(Category::SocialScience),
            "SCIENCE" => Some(Category::Science),
            "TECHNOLOGY" => Some(Category::Technology),
            "ART" => Some(Category::Art),
            "HISTORY" => Some(Category::History),
            "CHILDREN" => Some(Category::Children),
            "SELF_HELP" => Some(Category::SelfHelp),
            "ECONOMY" => Some(Category::Economy),
            _ => None,
        }
    }

    // dedup keeps the first occurrence of every tag, so the list behaves like an ordered set
    pub fn dedup(categories: &[Category]) -> Vec<Category> {
        let mut unique = Vec::with_capacity(categories.len());
        for category in categories {
            if !unique.contains(category) {
                unique.push(*category);
            }
        }
        unique
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Category::Novel => write!(f, "NOVEL"),
            Category::Essay => write!(f, "ESSAY"),
            Category::Poetry => write!(f, "POETRY"),
            Category::Humanities => write!(f, "HUMANITIES"),
            Category::SocialScience => write!(f, "SOCIAL_SCIENCE"),
            Category::Science => write!(f, "SCIENCE"),
            Category::Technology => write!(f, "TECHNOLOGY"),
            Category::Art => write!(f, "ART"),
            Category::History => write!(f, "HISTORY"),
            Category::Children => write!(f, "CHILDREN"),
            Category::SelfHelp => write!(f, "SELF_HELP"),
            Category::Economy => write!(f, "ECONOMY"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ADMIN" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}
