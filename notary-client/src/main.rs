//! notary - command-line client for the file notarization service
//!
//! One-shot commands run a single flow and exit non-zero unless the final
//! status is ok. `session` keeps both zones alive and reads commands from
//! stdin.

use std::cell::RefCell;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use notary_client::logging::{init_tracing, startup_banner};
use notary_client::{
    HttpDispatcher, InteractionCoordinator, OutputFormat, PanelRenderer, ResultPanel, Session,
    Zone, ZoneEvent,
};
use notary_common::config::{default_config_path, ConfigResolver, TomlConfig};
use notary_common::theme::ThemeStore;
use notary_common::SelectedFile;

/// Command-line arguments for notary
#[derive(Parser, Debug)]
#[command(name = "notary")]
#[command(about = "Record files on the notarization ledger and verify them later")]
#[command(version)]
struct Args {
    /// Backend base URL (overrides NOTARY_SERVER_URL and the config file)
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Config file (default: <config dir>/notary/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for client-local state such as the theme
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// How panels are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a file and record it for an account address
    Upload {
        file: PathBuf,
        /// 0x-prefixed 20-byte account address
        #[arg(short, long)]
        address: String,
    },
    /// Check whether a file has been recorded
    VerifyFile { file: PathBuf },
    /// Check whether a 0x-prefixed 32-byte content hash has been recorded
    VerifyHash { hash: String },
    /// Interactive session with both zones
    Session,
    /// Show or toggle the display theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Toggle,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let loaded = TomlConfig::load(&config_path).context("Failed to load configuration")?;

    init_tracing(&loaded.config.logging)?;

    info!("{}", startup_banner());
    loaded.log_source();

    let resolver = ConfigResolver::new(&loaded.config);
    let themes = ThemeStore::new(&resolver.state_dir(args.state_dir.as_deref()));

    if let Command::Theme { action } = &args.command {
        let theme = match action {
            Some(ThemeAction::Toggle) => themes.toggle().context("Failed to store theme")?,
            None => themes.load(),
        };
        println!("{}", theme.as_str());
        return Ok(ExitCode::SUCCESS);
    }

    let color = !args.no_color && std::io::stdout().is_terminal();
    let renderer = Rc::new(RefCell::new(PanelRenderer::new(
        args.format,
        themes.load(),
        color,
    )));

    let client_config = resolver
        .client_config(args.server_url.as_deref())
        .context("Invalid server configuration")?;
    info!("Backend: {}", client_config.base_url);
    let dispatcher = HttpDispatcher::new(client_config)?;

    let printer = Rc::clone(&renderer);
    let coordinator = InteractionCoordinator::new(dispatcher).with_observer(Box::new(
        move |_zone: Zone, panel: &ResultPanel| {
            let text = printer.borrow().render(panel);
            if !text.is_empty() {
                println!("{}", text);
            }
        },
    ));

    match args.command {
        Command::Upload { file, address } => {
            select(&coordinator, Zone::Upload, &file)?;
            coordinator.upload(&address).await;
            Ok(exit_code(&coordinator, Zone::Upload))
        }
        Command::VerifyFile { file } => {
            select(&coordinator, Zone::Verify, &file)?;
            coordinator.verify_file().await;
            Ok(exit_code(&coordinator, Zone::Verify))
        }
        Command::VerifyHash { hash } => {
            coordinator.verify_hash(&hash).await;
            Ok(exit_code(&coordinator, Zone::Verify))
        }
        Command::Session => {
            let session = Session::new(&coordinator, renderer, themes);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(stdin, &mut std::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Theme { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// Put `path` into `zone` through its file-selection control
fn select<D: notary_client::Dispatcher>(
    coordinator: &InteractionCoordinator<D>,
    zone: Zone,
    path: &Path,
) -> Result<()> {
    let file = SelectedFile::from_path(path)
        .with_context(|| format!("Cannot use {}", path.display()))?;
    coordinator.handle_zone_event(zone, ZoneEvent::Change(vec![file]));
    println!("{}", coordinator.slot(zone).meta_text);
    Ok(())
}

fn exit_code<D: notary_client::Dispatcher>(
    coordinator: &InteractionCoordinator<D>,
    zone: Zone,
) -> ExitCode {
    if coordinator.succeeded(zone) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
