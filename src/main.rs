use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use wstree::app::Browser;
use wstree::kernel::{settings, Action, Settings, Store};
use wstree::models::{load_seed, render_plain, sample_data, WorkspaceId};
use wstree::tui::terminal_guard::TerminalGuard;
use wstree::tui::view::View;

mod logging;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Default)]
struct CliArgs {
    seed: Option<PathBuf>,
    workspace: Option<WorkspaceId>,
    print: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> CliArgs {
    let mut cli = CliArgs::default();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--seed=") {
            cli.seed = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--workspace=") {
            cli.workspace = Some(WorkspaceId::new(value));
        } else if arg == "--print" {
            cli.print = true;
        } else {
            tracing::warn!(%arg, "ignoring unknown argument");
        }
    }
    cli
}

fn main() -> io::Result<()> {
    let logging = logging::init();
    let args = parse_args(std::env::args().skip(1));

    if let Err(err) = settings::ensure_settings_file() {
        tracing::warn!(error = %err, "cannot create settings file");
    }
    let settings = settings::load_settings().unwrap_or_default();

    let data = match args.seed.as_ref().or(settings.seed_path.as_ref()) {
        Some(path) => load_seed(path).inspect_err(|err| {
            tracing::error!(path = %path.display(), error = %err, "seed load failed");
        })?,
        None => sample_data(),
    };

    let mut store = Store::new(data).with_tree_trace(settings.trace_tree);
    let workspace = args
        .workspace
        .or_else(|| store.state().data.workspaces.first().map(|ws| ws.id.clone()));
    if let Some(id) = workspace {
        store.dispatch(Action::SetActiveWorkspace(id));
    }

    let result = if args.print {
        print_tree(&store, &settings)
    } else {
        run_tui(store, &settings)
    };

    if let (Err(err), Some(guard)) = (&result, &logging) {
        eprintln!("wstree: {err} (logs: {})", guard.log_dir().display());
    }
    result
}

fn print_tree(store: &Store, settings: &Settings) -> io::Result<()> {
    let Some(workspace) = store.current_workspace() else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "workspace not found",
        ));
    };

    let glyphs = settings.tree.glyphs();
    let rows = store.explorer_rows();
    let active = store.state().active_document_id.as_ref().map(|id| id.as_str());

    let mut out = io::stdout().lock();
    writeln!(out, "{} {}", glyphs.workspace, workspace.name)?;
    out.write_all(render_plain(&rows, active, settings.tree.indent_width, &glyphs).as_bytes())?;
    out.flush()
}

fn run_tui(store: Store, settings: &Settings) -> io::Result<()> {
    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signals =
        wstree::tui::terminal_guard::watch_termination_signals(guard.restore_handle(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut browser = Browser::new(store, settings);
    tracing::info!("browser started");

    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                browser.render(frame, area);
            })?;
            dirty = false;
        }

        if signal_rx.try_recv().is_ok() {
            break;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let result = browser.handle_input(&event::read()?);
        if result.is_quit() {
            break;
        }
        dirty = result.is_consumed();
    }

    tracing::info!("browser stopped");
    drop(terminal);
    drop(guard);
    Ok(())
}
