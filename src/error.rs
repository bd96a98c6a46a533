use thiserror::Error;

/// Failure modes of a route query.
///
/// Every failure aborts the in-flight query and surfaces to the caller;
/// nothing is retried and no partial result is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// An input or option was rejected before any I/O was performed.
    #[error("{field}: {reason}")]
    Validation {
        /// Name of the offending input or option
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// An exchange name does not match any supported exchange.
    #[error("unknown exchange: {0}")]
    UnknownExchange(String),

    /// A fraction was built with a zero divisor, or divided by a
    /// zero-valued operand. Only malformed reserve data can get here.
    #[error("division by zero")]
    DivisionByZero,

    /// The pool listing service answered with a non-success status or a
    /// body that failed validation.
    #[error("swap endpoint: status={status}; body={body}")]
    Endpoint {
        /// HTTP status of the response, 0 when the request never completed
        status: u16,
        /// Raw response body, or the message explaining why it was rejected
        body: String,
    },

    /// The chain node or the reserve helper contract call failed.
    #[error("chain endpoint: {0}")]
    Rpc(String),

    /// A route reached scoring without its steps being linked. This signals
    /// a bug in route assembly, not a user input error.
    #[error("malformed route: expect linked steps")]
    MalformedRoute,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
