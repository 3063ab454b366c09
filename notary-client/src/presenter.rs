//! Dispatch outcome → status badge + detail panel
//!
//! [`present`] is pure. [`ResultPanel`] is the mutable view a flow writes
//! into; every write empties the detail area before filling it again.

use serde_json::Value;

use notary_common::payload::{display_field, match_indicator, FILE_HASH_FIELDS, TX_HASH_FIELDS};
use notary_common::{DispatchOutcome, ValidationError};

/// Which flow produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Submit,
    VerifyFile,
    VerifyHash,
}

impl OperationKind {
    fn pending_text(self) -> &'static str {
        match self {
            OperationKind::Submit => "Uploading & sending transaction…",
            OperationKind::VerifyFile => "Verifying file…",
            OperationKind::VerifyHash => "Looking up hash…",
        }
    }

    fn failure_text(self, status: u16) -> String {
        match self {
            OperationKind::Submit => format!("Upload failed ({})", status),
            OperationKind::VerifyFile | OperationKind::VerifyHash => {
                format!("Verification failed ({})", status)
            }
        }
    }

    fn no_match_text(self) -> &'static str {
        match self {
            OperationKind::VerifyHash => "Not found ✖",
            OperationKind::Submit | OperationKind::VerifyFile => "No match ✖",
        }
    }
}

/// Badge style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ok,
    Warn,
    Err,
}

impl StatusKind {
    /// CSS class / terminal tag
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Ok => "ok",
            StatusKind::Warn => "warn",
            StatusKind::Err => "err",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusBadge {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Label shown for an upload identifier the backend did not return
pub const MISSING_FIELD: &str = "(missing)";

/// Content under the status badge
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailPanel {
    #[default]
    Empty,
    /// Response body, shown pretty-printed
    Json(Value),
    /// Label/value rows
    Rows(Vec<(String, String)>),
    /// Raw text such as a transport error
    Text(String),
}

impl DetailPanel {
    pub fn is_empty(&self) -> bool {
        matches!(self, DetailPanel::Empty)
    }
}

/// Badge and detail for one outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub badge: StatusBadge,
    pub detail: DetailPanel,
}

pub fn present(kind: OperationKind, outcome: &DispatchOutcome) -> Presentation {
    match outcome {
        DispatchOutcome::Pending => Presentation {
            badge: StatusBadge::new(StatusKind::Ok, kind.pending_text()),
            detail: DetailPanel::Empty,
        },
        DispatchOutcome::Ok(payload) => match kind {
            OperationKind::Submit => present_receipt(payload),
            OperationKind::VerifyFile | OperationKind::VerifyHash => {
                let badge = if match_indicator(payload) {
                    StatusBadge::new(StatusKind::Ok, "Match ✔")
                } else {
                    StatusBadge::new(StatusKind::Err, kind.no_match_text())
                };
                Presentation {
                    badge,
                    detail: DetailPanel::Json(payload.clone()),
                }
            }
        },
        DispatchOutcome::HttpError { status, body } => Presentation {
            badge: StatusBadge::new(StatusKind::Err, kind.failure_text(*status)),
            detail: DetailPanel::Json(body.clone()),
        },
        DispatchOutcome::NetworkError(message) => Presentation {
            badge: StatusBadge::new(StatusKind::Err, "Network error"),
            detail: DetailPanel::Text(message.clone()),
        },
    }
}

fn present_receipt(payload: &Value) -> Presentation {
    let field = |names: &[&str]| {
        display_field(payload, names).unwrap_or_else(|| MISSING_FIELD.to_string())
    };
    Presentation {
        badge: StatusBadge::new(StatusKind::Ok, "Recorded on-chain ✔"),
        detail: DetailPanel::Rows(vec![
            ("Tx Hash".to_string(), field(TX_HASH_FIELDS)),
            ("File Hash".to_string(), field(FILE_HASH_FIELDS)),
        ]),
    }
}

/// Warn badge for input rejected before dispatch
pub fn present_rejection(error: &ValidationError) -> StatusBadge {
    StatusBadge::new(StatusKind::Warn, error.to_string())
}

/// Status + detail area of one panel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPanel {
    pub status: Option<StatusBadge>,
    pub detail: DetailPanel,
}

impl ResultPanel {
    pub fn apply(&mut self, presentation: Presentation) {
        self.detail = DetailPanel::Empty;
        self.status = Some(presentation.badge);
        self.detail = presentation.detail;
    }

    /// Show a badge with nothing under it
    pub fn show_badge(&mut self, badge: StatusBadge) {
        self.apply(Presentation {
            badge,
            detail: DetailPanel::Empty,
        });
    }

    pub fn clear(&mut self) {
        self.status = None;
        self.detail = DetailPanel::Empty;
    }

    pub fn is_clear(&self) -> bool {
        self.status.is_none() && self.detail.is_empty()
    }

    pub fn status_kind(&self) -> Option<StatusKind> {
        self.status.as_ref().map(|b| b.kind)
    }
}
