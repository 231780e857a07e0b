use serde::Deserialize;
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Twirp's canonical code set. Callers match on the code — never on the
// human-readable message string.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Canceled,
    Unknown,
    InvalidArgument,
    Malformed,
    DeadlineExceeded,
    NotFound,
    BadRoute,
    AlreadyExists,
    PermissionDenied,
    Unauthenticated,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Canceled => "canceled",
            ErrorCode::Unknown => "unknown",
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::Malformed => "malformed",
            ErrorCode::DeadlineExceeded => "deadline_exceeded",
            ErrorCode::NotFound => "not_found",
            ErrorCode::BadRoute => "bad_route",
            ErrorCode::AlreadyExists => "already_exists",
            ErrorCode::PermissionDenied => "permission_denied",
            ErrorCode::Unauthenticated => "unauthenticated",
            ErrorCode::ResourceExhausted => "resource_exhausted",
            ErrorCode::FailedPrecondition => "failed_precondition",
            ErrorCode::Aborted => "aborted",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::Unimplemented => "unimplemented",
            ErrorCode::Internal => "internal",
            ErrorCode::Unavailable => "unavailable",
            ErrorCode::DataLoss => "dataloss",
        }
    }

    /// Parse a wire code; anything unrecognized maps to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "canceled" => ErrorCode::Canceled,
            "invalid_argument" => ErrorCode::InvalidArgument,
            "malformed" => ErrorCode::Malformed,
            "deadline_exceeded" => ErrorCode::DeadlineExceeded,
            "not_found" => ErrorCode::NotFound,
            "bad_route" => ErrorCode::BadRoute,
            "already_exists" => ErrorCode::AlreadyExists,
            "permission_denied" => ErrorCode::PermissionDenied,
            "unauthenticated" => ErrorCode::Unauthenticated,
            "resource_exhausted" => ErrorCode::ResourceExhausted,
            "failed_precondition" => ErrorCode::FailedPrecondition,
            "aborted" => ErrorCode::Aborted,
            "out_of_range" => ErrorCode::OutOfRange,
            "unimplemented" => ErrorCode::Unimplemented,
            "internal" => ErrorCode::Internal,
            "unavailable" => ErrorCode::Unavailable,
            "dataloss" => ErrorCode::DataLoss,
            _ => ErrorCode::Unknown,
        }
    }
}

// ── RpcError ────────────────────────────────────────────────────────

/// A failed unary call.
///
/// Display is the server-supplied message alone, so it can be surfaced
/// to the user as-is; the code stays available for matching.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct RpcError {
    pub code: ErrorCode,
    pub message: String,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Transport-level failure (connection refused, decode failure, …).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.code == ErrorCode::Unauthenticated
    }
}

/// Twirp error response body: `{"code": "...", "msg": "..."}`.
#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    msg: String,
}

impl RpcError {
    /// Decode an error payload from a non-2xx response body.
    pub(crate) fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<WireError>(body) {
            Ok(wire) if !wire.code.is_empty() => {
                Self::new(ErrorCode::parse(&wire.code), wire.msg)
            }
            _ => Self::new(
                ErrorCode::Unknown,
                format!("unexpected response status {status}"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strings_round_trip() {
        for code in [
            ErrorCode::Canceled,
            ErrorCode::InvalidArgument,
            ErrorCode::NotFound,
            ErrorCode::Unauthenticated,
            ErrorCode::PermissionDenied,
            ErrorCode::Internal,
            ErrorCode::Unavailable,
        ] {
            assert_eq!(ErrorCode::parse(code.as_str()), code);
        }
    }

    #[test]
    fn unknown_code_string_parses_to_unknown() {
        assert_eq!(ErrorCode::parse("weird_new_code"), ErrorCode::Unknown);
        assert_eq!(ErrorCode::parse(""), ErrorCode::Unknown);
    }

    #[test]
    fn wire_error_body_decodes() {
        let err = RpcError::from_body(
            401,
            br#"{"code":"unauthenticated","msg":"session expired"}"#,
        );
        assert!(err.is_unauthenticated());
        assert_eq!(err.to_string(), "session expired");
    }

    #[test]
    fn garbage_body_falls_back_to_status() {
        let err = RpcError::from_body(502, b"<html>bad gateway</html>");
        assert_eq!(err.code, ErrorCode::Unknown);
        assert!(err.message.contains("502"));
    }

    #[test]
    fn display_is_just_the_message() {
        let err = RpcError::new(ErrorCode::NotFound, "device 42 not found");
        assert_eq!(err.to_string(), "device 42 not found");
    }
}
