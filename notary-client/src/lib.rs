//! notary-client library
//!
//! Client side of the file notarization service: picks up files from two
//! drop zones, validates input, talks to the backend's upload and verify
//! endpoints, and turns each answer into a status badge and detail panel.

pub mod acquisition;
pub mod coordinator;
pub mod dispatcher;
pub mod logging;
pub mod presenter;
pub mod render;
pub mod session;

pub use acquisition::{ClickTarget, DropZone, ZoneEvent, ZoneResponse};
pub use coordinator::{FlowReport, InteractionCoordinator, SessionState, Zone, ZoneSlot};
pub use dispatcher::{Dispatcher, HttpDispatcher, UPLOAD_PATH, VERIFY_PATH};
pub use presenter::{
    present, DetailPanel, OperationKind, Presentation, ResultPanel, StatusBadge, StatusKind,
};
pub use render::{OutputFormat, PanelRenderer};
pub use session::{Session, SessionCommand};
