//! Interaction coordinator
//!
//! Owns the two acquisition zones, their file slots, and the two result
//! panels, and runs the three flows:
//!
//! | Flow           | Needs                     | Writes panel |
//! |----------------|---------------------------|--------------|
//! | upload         | upload-zone file, address | upload       |
//! | verify_file    | verify-zone file          | verify       |
//! | verify_hash    | hash                      | verify       |
//!
//! Everything runs on one thread. State lives in `RefCell`s and no borrow
//! is held across the dispatch `.await`, which is the only suspension point
//! of a flow.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use notary_common::file::human_file_meta;
use notary_common::{Address, ContentHash, DispatchOutcome, SelectedFile, ValidationError};

use crate::acquisition::{DropZone, ZoneEvent, ZoneResponse};
use crate::dispatcher::Dispatcher;
use crate::presenter::{present, present_rejection, OperationKind, ResultPanel, StatusKind};

/// Acquisition zone, also naming the panel it is paired with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Upload,
    Verify,
}

impl Zone {
    /// Id of the zone's file-selection control
    pub fn control_id(self) -> &'static str {
        match self {
            Zone::Upload => "file",
            Zone::Verify => "fileVerify",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Upload => "upload",
            Zone::Verify => "verify",
        }
    }
}

impl std::str::FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Zone::Upload),
            "verify" => Ok(Zone::Verify),
            other => Err(format!("unknown zone '{}' (expected upload or verify)", other)),
        }
    }
}

fn panel_for(kind: OperationKind) -> Zone {
    match kind {
        OperationKind::Submit => Zone::Upload,
        OperationKind::VerifyFile | OperationKind::VerifyHash => Zone::Verify,
    }
}

/// File slot of one zone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSlot {
    pub file: Option<SelectedFile>,
    /// One-line description of `file`, empty when none
    pub meta_text: String,
}

/// Session state written by zone callbacks, flows, and `clear`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub upload: ZoneSlot,
    pub verify: ZoneSlot,
    pub upload_panel: ResultPanel,
    pub verify_panel: ResultPanel,
}

impl SessionState {
    pub fn slot(&self, zone: Zone) -> &ZoneSlot {
        match zone {
            Zone::Upload => &self.upload,
            Zone::Verify => &self.verify,
        }
    }

    fn slot_mut(&mut self, zone: Zone) -> &mut ZoneSlot {
        match zone {
            Zone::Upload => &mut self.upload,
            Zone::Verify => &mut self.verify,
        }
    }

    pub fn panel(&self, zone: Zone) -> &ResultPanel {
        match zone {
            Zone::Upload => &self.upload_panel,
            Zone::Verify => &self.verify_panel,
        }
    }

    fn panel_mut(&mut self, zone: Zone) -> &mut ResultPanel {
        match zone {
            Zone::Upload => &mut self.upload_panel,
            Zone::Verify => &mut self.verify_panel,
        }
    }
}

/// How a triggered flow ended
#[derive(Debug, Clone, PartialEq)]
pub enum FlowReport {
    /// Input rejected; nothing was sent
    Rejected(ValidationError),
    /// Same flow already waiting on a response; nothing was sent
    Busy,
    /// Request sent and answered (or failed in transport)
    Completed(DispatchOutcome),
}

/// Called after every panel change
pub type PanelObserver = Box<dyn Fn(Zone, &ResultPanel)>;

type FileCallback = Box<dyn FnMut(SelectedFile)>;

#[derive(Default)]
struct InFlight {
    submit: Cell<bool>,
    verify_file: Cell<bool>,
    verify_hash: Cell<bool>,
}

impl InFlight {
    fn flag(&self, kind: OperationKind) -> &Cell<bool> {
        match kind {
            OperationKind::Submit => &self.submit,
            OperationKind::VerifyFile => &self.verify_file,
            OperationKind::VerifyHash => &self.verify_hash,
        }
    }
}

/// Clears an in-flight flag when the flow finishes or its future is dropped
struct FlightGuard<'a>(&'a Cell<bool>);

impl<'a> FlightGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct InteractionCoordinator<D> {
    dispatcher: D,
    state: Rc<RefCell<SessionState>>,
    upload_zone: RefCell<DropZone<FileCallback>>,
    verify_zone: RefCell<DropZone<FileCallback>>,
    in_flight: InFlight,
    observer: Option<PanelObserver>,
}

impl<D: Dispatcher> InteractionCoordinator<D> {
    pub fn new(dispatcher: D) -> Self {
        let state = Rc::new(RefCell::new(SessionState::default()));
        Self {
            dispatcher,
            upload_zone: RefCell::new(Self::zone(Zone::Upload, &state)),
            verify_zone: RefCell::new(Self::zone(Zone::Verify, &state)),
            state,
            in_flight: InFlight::default(),
            observer: None,
        }
    }

    /// Register a callback run after every panel change
    pub fn with_observer(mut self, observer: PanelObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    fn zone(zone: Zone, state: &Rc<RefCell<SessionState>>) -> DropZone<FileCallback> {
        let state = Rc::clone(state);
        let on_file: FileCallback = Box::new(move |file: SelectedFile| {
            let meta = human_file_meta(&file);
            debug!(zone = zone.as_str(), file = %meta, "File selected");
            let mut state = state.borrow_mut();
            let slot = state.slot_mut(zone);
            slot.meta_text = meta;
            slot.file = Some(file);
        });
        DropZone::new(zone.control_id(), on_file)
    }

    fn zone_cell(&self, zone: Zone) -> &RefCell<DropZone<FileCallback>> {
        match zone {
            Zone::Upload => &self.upload_zone,
            Zone::Verify => &self.verify_zone,
        }
    }

    /// Route a host event to a zone
    pub fn handle_zone_event(&self, zone: Zone, event: ZoneEvent) -> ZoneResponse {
        self.zone_cell(zone).borrow_mut().handle(event)
    }

    /// Whether a drag is hovering over `zone`
    pub fn drag_active(&self, zone: Zone) -> bool {
        self.zone_cell(zone).borrow().drag_active()
    }

    /// Whether `zone`'s file-selection control holds a value
    pub fn control_has_value(&self, zone: Zone) -> bool {
        self.zone_cell(zone).borrow().control_value().is_some()
    }

    /// Reset `zone`: file, control, metadata, status and result panel
    pub fn clear(&self, zone: Zone) {
        self.zone_cell(zone).borrow_mut().reset_control();
        {
            let mut state = self.state.borrow_mut();
            *state.slot_mut(zone) = ZoneSlot::default();
            state.panel_mut(zone).clear();
        }
        info!(zone = zone.as_str(), "Zone cleared");
        self.notify(zone);
    }

    pub fn slot(&self, zone: Zone) -> ZoneSlot {
        self.state.borrow().slot(zone).clone()
    }

    pub fn panel(&self, zone: Zone) -> ResultPanel {
        self.state.borrow().panel(zone).clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Whether `zone`'s panel ends on an ok badge; warn, err and no badge
    /// all count as failure
    pub fn succeeded(&self, zone: Zone) -> bool {
        self.state.borrow().panel(zone).status_kind() == Some(StatusKind::Ok)
    }

    /// Upload the upload-zone file on behalf of `address`
    pub async fn upload(&self, address: &str) -> FlowReport {
        let kind = OperationKind::Submit;
        let Some(_guard) = self.enter(kind) else {
            return FlowReport::Busy;
        };

        let file = self.state.borrow().upload.file.clone();
        let Some(file) = file else {
            return self.reject(kind, ValidationError::MissingUploadFile);
        };
        let address = match Address::parse(address) {
            Ok(address) => address,
            Err(e) => return self.reject(kind, e),
        };

        self.dispatch(kind, self.dispatcher.submit_file(&file, &address)).await
    }

    /// Verify the verify-zone file
    pub async fn verify_file(&self) -> FlowReport {
        let kind = OperationKind::VerifyFile;
        let Some(_guard) = self.enter(kind) else {
            return FlowReport::Busy;
        };

        let file = self.state.borrow().verify.file.clone();
        let Some(file) = file else {
            return self.reject(kind, ValidationError::MissingVerifyFile);
        };

        self.dispatch(kind, self.dispatcher.verify_file(&file)).await
    }

    /// Look up a content hash
    pub async fn verify_hash(&self, hash: &str) -> FlowReport {
        let kind = OperationKind::VerifyHash;
        let Some(_guard) = self.enter(kind) else {
            return FlowReport::Busy;
        };

        let hash = match ContentHash::parse(hash) {
            Ok(hash) => hash,
            Err(e) => return self.reject(kind, e),
        };

        self.dispatch(kind, self.dispatcher.verify_hash(&hash)).await
    }

    fn enter(&self, kind: OperationKind) -> Option<FlightGuard<'_>> {
        let guard = FlightGuard::enter(self.in_flight.flag(kind));
        if guard.is_none() {
            warn!(flow = ?kind, "Flow already in flight, ignoring trigger");
        }
        guard
    }

    fn reject(&self, kind: OperationKind, error: ValidationError) -> FlowReport {
        debug!(flow = ?kind, "Rejected before dispatch: {}", error);
        let zone = panel_for(kind);
        self.state
            .borrow_mut()
            .panel_mut(zone)
            .show_badge(present_rejection(&error));
        self.notify(zone);
        FlowReport::Rejected(error)
    }

    async fn dispatch<F>(&self, kind: OperationKind, request: F) -> FlowReport
    where
        F: std::future::Future<Output = DispatchOutcome>,
    {
        self.show(kind, &DispatchOutcome::Pending);
        let outcome = request.await;
        self.show(kind, &outcome);
        FlowReport::Completed(outcome)
    }

    fn show(&self, kind: OperationKind, outcome: &DispatchOutcome) {
        let zone = panel_for(kind);
        self.state
            .borrow_mut()
            .panel_mut(zone)
            .apply(present(kind, outcome));
        self.notify(zone);
    }

    fn notify(&self, zone: Zone) {
        if let Some(observer) = &self.observer {
            let panel = self.panel(zone);
            observer(zone, &panel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_parsing() {
        assert_eq!("upload".parse::<Zone>(), Ok(Zone::Upload));
        assert_eq!("verify".parse::<Zone>(), Ok(Zone::Verify));
        assert!("both".parse::<Zone>().is_err());
    }

    #[test]
    fn test_flight_guard_releases_on_drop() {
        let flag = Cell::new(false);
        {
            let guard = FlightGuard::enter(&flag);
            assert!(guard.is_some());
            assert!(flag.get());
            assert!(FlightGuard::enter(&flag).is_none());
        }
        assert!(!flag.get());
        assert!(FlightGuard::enter(&flag).is_some());
    }

    #[test]
    fn test_verify_flows_share_a_panel() {
        assert_eq!(panel_for(OperationKind::VerifyFile), Zone::Verify);
        assert_eq!(panel_for(OperationKind::VerifyHash), Zone::Verify);
        assert_eq!(panel_for(OperationKind::Submit), Zone::Upload);
    }
}
