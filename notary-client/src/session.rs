//! Line-oriented interactive session
//!
//! Drives one coordinator from text commands, one per line. Panel changes
//! are printed by the coordinator's observer; the session itself only
//! prints zone metadata, theme changes, and command errors.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use notary_common::theme::ThemeStore;
use notary_common::SelectedFile;

use crate::acquisition::ZoneEvent;
use crate::coordinator::{FlowReport, InteractionCoordinator, Zone};
use crate::dispatcher::Dispatcher;
use crate::render::PanelRenderer;

pub const HELP: &str = "\
commands:
  drop <upload|verify> <path>...    drop files on a zone (first one is kept)
  select <upload|verify> <path>...  pick files with the zone's control
  clear <upload|verify>             reset a zone and its panel
  upload <address>                  record the upload-zone file
  verify-file                       verify the verify-zone file
  verify-hash <hash>                look up a 0x… content hash
  status                            show both zones
  theme                             toggle light/dark
  help                              this text
  quit                              leave the session";

/// Malformed session command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Zone(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Drop { zone: Zone, paths: Vec<PathBuf> },
    Select { zone: Zone, paths: Vec<PathBuf> },
    Clear(Zone),
    Upload { address: String },
    VerifyFile,
    VerifyHash { hash: String },
    Status,
    Theme,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        if verb.starts_with('#') {
            return Ok(None);
        }
        let rest: Vec<&str> = words.collect();

        let zone_arg = |usage: &'static str| -> Result<Zone, CommandError> {
            rest.first()
                .ok_or(CommandError::Usage(usage))?
                .parse::<Zone>()
                .map_err(CommandError::Zone)
        };
        let paths = || rest.iter().skip(1).map(PathBuf::from).collect::<Vec<_>>();

        let command = match verb {
            "drop" => SessionCommand::Drop {
                zone: zone_arg("drop <upload|verify> <path>...")?,
                paths: paths(),
            },
            "select" => SessionCommand::Select {
                zone: zone_arg("select <upload|verify> <path>...")?,
                paths: paths(),
            },
            "clear" => SessionCommand::Clear(zone_arg("clear <upload|verify>")?),
            // A missing address is left for the flow to reject
            "upload" => SessionCommand::Upload {
                address: rest.first().copied().unwrap_or_default().to_string(),
            },
            "verify-file" => SessionCommand::VerifyFile,
            "verify-hash" => SessionCommand::VerifyHash {
                hash: rest.first().copied().unwrap_or_default().to_string(),
            },
            "status" => SessionCommand::Status,
            "theme" => SessionCommand::Theme,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub struct Session<'a, D> {
    coordinator: &'a InteractionCoordinator<D>,
    renderer: Rc<RefCell<PanelRenderer>>,
    themes: ThemeStore,
}

impl<'a, D: Dispatcher> Session<'a, D> {
    pub fn new(
        coordinator: &'a InteractionCoordinator<D>,
        renderer: Rc<RefCell<PanelRenderer>>,
        themes: ThemeStore,
    ) -> Self {
        Self {
            coordinator,
            renderer,
            themes,
        }
    }

    /// Read and execute commands until `quit` or end of input
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Type 'help' for commands.")?;
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match SessionCommand::parse(&line) {
                Ok(None) => {}
                Ok(Some(SessionCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command, out).await?,
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }
        debug!("Session input finished");
        Ok(())
    }

    pub async fn execute<W: Write>(&self, command: SessionCommand, out: &mut W) -> Result<()> {
        match command {
            SessionCommand::Drop { zone, paths } => {
                let files = resolve_files(&paths, out)?;
                self.coordinator.handle_zone_event(zone, ZoneEvent::DragEnter);
                let response = self.coordinator.handle_zone_event(zone, ZoneEvent::Drop(files));
                self.report_selection(zone, response.accepted, out)?;
            }
            SessionCommand::Select { zone, paths } => {
                let files = resolve_files(&paths, out)?;
                let response = self.coordinator.handle_zone_event(zone, ZoneEvent::Change(files));
                self.report_selection(zone, response.accepted, out)?;
            }
            SessionCommand::Clear(zone) => {
                self.coordinator.clear(zone);
                writeln!(out, "{}: cleared", zone.as_str())?;
            }
            SessionCommand::Upload { address } => {
                let report = self.coordinator.upload(&address).await;
                self.report_busy(&report, out)?;
            }
            SessionCommand::VerifyFile => {
                let report = self.coordinator.verify_file().await;
                self.report_busy(&report, out)?;
            }
            SessionCommand::VerifyHash { hash } => {
                let report = self.coordinator.verify_hash(&hash).await;
                self.report_busy(&report, out)?;
            }
            SessionCommand::Status => self.print_status(out)?,
            SessionCommand::Theme => match self.themes.toggle() {
                Ok(theme) => {
                    self.renderer.borrow_mut().set_theme(theme);
                    writeln!(out, "theme: {}", theme.as_str())?;
                }
                Err(e) => {
                    warn!("Failed to store theme: {}", e);
                    writeln!(out, "error: {}", e)?;
                }
            },
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn report_selection<W: Write>(&self, zone: Zone, accepted: bool, out: &mut W) -> Result<()> {
        if accepted {
            writeln!(out, "{}: {}", zone.as_str(), self.coordinator.slot(zone).meta_text)?;
        } else {
            writeln!(out, "{}: no file accepted", zone.as_str())?;
        }
        Ok(())
    }

    fn report_busy<W: Write>(&self, report: &FlowReport, out: &mut W) -> Result<()> {
        if *report == FlowReport::Busy {
            writeln!(out, "busy: previous request still pending")?;
        }
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let renderer = self.renderer.borrow();
        for zone in [Zone::Upload, Zone::Verify] {
            let slot = self.coordinator.slot(zone);
            let meta = if slot.meta_text.is_empty() {
                "(no file)"
            } else {
                slot.meta_text.as_str()
            };
            writeln!(out, "{}: {}", zone.as_str(), meta)?;
            let panel = renderer.render(&self.coordinator.panel(zone));
            if !panel.is_empty() {
                writeln!(out, "{}", panel)?;
            }
        }
        Ok(())
    }
}

/// Stat each path; unusable ones are reported and skipped
fn resolve_files<W: Write>(paths: &[PathBuf], out: &mut W) -> Result<Vec<SelectedFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match SelectedFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => writeln!(out, "skipping {}: {}", path.display(), e)?,
        }
    }
    Ok(files)
}
