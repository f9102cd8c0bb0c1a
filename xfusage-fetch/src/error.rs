//! Fetch error types.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

// ============================================================================
// Login Step
// ============================================================================

/// The three network steps of a usage refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    /// GET the force-connect page carrying the `reqId` token.
    Bootstrap,
    /// POST the login form.
    Login,
    /// GET the usage JSON.
    Usage,
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoginStep::Bootstrap => "Failed to find reqId",
            LoginStep::Login => "Failed to login",
            LoginStep::Usage => "Failed to fetch data",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for a usage refresh.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// A step answered with something other than 200.
    #[error("{step}, status code: {status}")]
    UnexpectedStatus {
        /// Step that failed.
        step: LoginStep,
        /// Status code received.
        status: StatusCode,
    },

    /// The bootstrap page had no hidden `reqId` input.
    #[error("reqId token not found in login page")]
    MissingRequestToken,

    /// Invalid response from the usage API.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] xfusage_core::CoreError),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(HttpError::Request(err))
    }
}

impl FetchError {
    /// Returns the step the error belongs to, if it can be told apart.
    ///
    /// Transport errors carry no step.
    pub fn step(&self) -> Option<LoginStep> {
        match self {
            FetchError::UnexpectedStatus { step, .. } => Some(*step),
            FetchError::MissingRequestToken => Some(LoginStep::Bootstrap),
            FetchError::InvalidResponse(_) | FetchError::Core(_) => Some(LoginStep::Usage),
            FetchError::Http(_) => None,
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
