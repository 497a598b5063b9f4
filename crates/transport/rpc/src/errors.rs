//! Error types for the transport RPC server.

use jsonrpsee::types::{ErrorCode, ErrorObjectOwned};
use thiserror::Error;

/// The code returned when a request reverted during execution.
pub const REVERT_ERROR_CODE: i32 = -32015;

/// The message returned for a revert without a reason.
pub const REVERT_ERROR_MESSAGE: &str = "revert: requested action reverted";

/// The closed set of JSON-RPC failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorKind {
    /// The request body was not valid JSON.
    ParseError,
    /// The request was not a well-formed JSON-RPC envelope.
    InvalidRequest,
    /// The method is not served.
    MethodNotFound,
    /// The method is served but its parameters are invalid.
    InvalidParams,
    /// Execution reverted.
    Revert,
    /// Any other failure.
    Internal,
}

impl RpcErrorKind {
    /// Returns the wire code.
    pub fn code(&self) -> i32 {
        match self {
            Self::ParseError => ErrorCode::ParseError.code(),
            Self::InvalidRequest => ErrorCode::InvalidRequest.code(),
            Self::MethodNotFound => ErrorCode::MethodNotFound.code(),
            Self::InvalidParams => ErrorCode::InvalidParams.code(),
            Self::Revert => REVERT_ERROR_CODE,
            Self::Internal => ErrorCode::InternalError.code(),
        }
    }

    /// Returns the generic message sent with the code.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ParseError => ErrorCode::ParseError.message(),
            Self::InvalidRequest => ErrorCode::InvalidRequest.message(),
            Self::MethodNotFound => ErrorCode::MethodNotFound.message(),
            Self::InvalidParams => ErrorCode::InvalidParams.message(),
            Self::Revert => REVERT_ERROR_MESSAGE,
            Self::Internal => ErrorCode::InternalError.message(),
        }
    }

    /// Returns a label for metrics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "parse_error",
            Self::InvalidRequest => "invalid_request",
            Self::MethodNotFound => "method_not_found",
            Self::InvalidParams => "invalid_params",
            Self::Revert => "revert",
            Self::Internal => "internal",
        }
    }
}

impl From<RpcErrorKind> for ErrorObjectOwned {
    fn from(kind: RpcErrorKind) -> Self {
        Self::owned(kind.code(), kind.message(), None::<()>)
    }
}

/// A failure reported by a [`FullnodeHandler`](crate::FullnodeHandler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The handler does not serve the method.
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
    /// The parameters could not be parsed for the method.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
    /// Execution reverted with the given reason.
    #[error("{0}")]
    Revert(String),
    /// Any other failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Returns the [`RpcErrorKind`] this error maps to.
    pub const fn kind(&self) -> RpcErrorKind {
        match self {
            Self::UnsupportedMethod(_) => RpcErrorKind::MethodNotFound,
            Self::InvalidParams(_) => RpcErrorKind::InvalidParams,
            Self::Revert(_) => RpcErrorKind::Revert,
            Self::Internal(_) => RpcErrorKind::Internal,
        }
    }

    /// Builds the wire error object.
    ///
    /// Only reverts carry their own message. Every other kind is reported with the generic
    /// message of its code.
    pub fn to_error_object(&self) -> ErrorObjectOwned {
        match self {
            Self::Revert(reason) => {
                ErrorObjectOwned::owned(REVERT_ERROR_CODE, reason.clone(), None::<()>)
            }
            other => other.kind().into(),
        }
    }
}
