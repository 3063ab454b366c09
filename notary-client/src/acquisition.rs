//! Drop-zone file acquisition
//!
//! A zone is a drop-target region paired with a file-selection control.
//! [`DropZone::handle`] consumes one host event and reports what the host
//! should do with it; every accepted file goes to the zone's callback.
//! Only the first file of a gesture is ever taken.

use std::path::PathBuf;

use notary_common::SelectedFile;

/// What a click inside the region landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// Anywhere in the region that is not the control or its label
    Region,
    /// The file-selection control itself
    FileControl,
    /// A label, with the id of the control it is bound to (if any)
    Label { for_id: Option<String> },
}

/// Host event delivered to a zone
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    Click(ClickTarget),
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<SelectedFile>),
    /// File-selection control changed
    Change(Vec<SelectedFile>),
}

/// Host-side effects requested by a zone for one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneResponse {
    /// Cancel the host's default action
    pub prevent_default: bool,
    /// Stop the event from reaching enclosing handlers
    pub stop_propagation: bool,
    /// Programmatically activate the file-selection control
    pub open_picker: bool,
    /// A file was accepted and handed to the callback
    pub accepted: bool,
}

impl ZoneResponse {
    fn intercepted() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
            ..Self::default()
        }
    }
}

/// One acquisition zone with its own callback
pub struct DropZone<F>
where
    F: FnMut(SelectedFile),
{
    control_id: String,
    drag_active: bool,
    control_value: Option<PathBuf>,
    on_file: F,
}

impl<F> DropZone<F>
where
    F: FnMut(SelectedFile),
{
    pub fn new(control_id: impl Into<String>, on_file: F) -> Self {
        Self {
            control_id: control_id.into(),
            drag_active: false,
            control_value: None,
            on_file,
        }
    }

    /// True while a drag is hovering over the region
    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// Value currently held by the file-selection control
    pub fn control_value(&self) -> Option<&PathBuf> {
        self.control_value.as_ref()
    }

    /// Empty the file-selection control
    pub fn reset_control(&mut self) {
        self.control_value = None;
    }

    pub fn handle(&mut self, event: ZoneEvent) -> ZoneResponse {
        match event {
            ZoneEvent::Click(target) => self.on_click(target),
            ZoneEvent::DragEnter | ZoneEvent::DragOver => {
                self.drag_active = true;
                ZoneResponse::intercepted()
            }
            ZoneEvent::DragLeave => {
                self.drag_active = false;
                ZoneResponse::intercepted()
            }
            ZoneEvent::Drop(files) => {
                self.drag_active = false;
                let mut response = ZoneResponse::intercepted();
                response.accepted = self.accept_first(files);
                response
            }
            ZoneEvent::Change(files) => {
                self.control_value = files.first().map(|f| f.path.clone());
                ZoneResponse {
                    accepted: self.accept_first(files),
                    ..ZoneResponse::default()
                }
            }
        }
    }

    fn on_click(&self, target: ClickTarget) -> ZoneResponse {
        match target {
            ClickTarget::FileControl => ZoneResponse::default(),
            // Associated label activates the control natively; forwarding too
            // would open the picker twice.
            ClickTarget::Label { for_id: Some(id) } if id == self.control_id => ZoneResponse {
                stop_propagation: true,
                ..ZoneResponse::default()
            },
            ClickTarget::Region | ClickTarget::Label { .. } => ZoneResponse {
                open_picker: true,
                ..ZoneResponse::default()
            },
        }
    }

    fn accept_first(&mut self, files: Vec<SelectedFile>) -> bool {
        match files.into_iter().next() {
            Some(file) => {
                (self.on_file)(file);
                true
            }
            None => false,
        }
    }
}
