use anyhow::Error;
use serde_json::json;
use std::fmt;

/// Broad category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required piece of linking context (session, student, class) is absent.
    MissingContext,
    /// An upstream document could not be understood.
    InvalidPayload,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Stable code used in JSON error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingContext => "missing_context",
            Self::InvalidPayload => "invalid_payload",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn missing_context<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::MissingContext, err)
    }

    pub fn invalid_payload<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidPayload, err)
    }

    pub fn is_missing_context(&self) -> bool {
        self.kind == ErrorKind::MissingContext
    }

    /// JSON body handed to the presentation layer.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "error": {
                "code": self.kind.code(),
                "message": self.error.to_string(),
            }
        })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.error)
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
