//! Normalized result of one network operation

use serde_json::Value;

/// Outcome of a single dispatch
///
/// `Pending` is presented before the request goes out; exactly one of the
/// other variants is produced when it finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Request issued, no answer yet
    Pending,

    /// 2xx response with its JSON body (`{}` when the body was not JSON)
    Ok(Value),

    /// Non-2xx response with its best-effort JSON body
    HttpError { status: u16, body: Value },

    /// No response at all; carries the transport error's description
    NetworkError(String),
}
