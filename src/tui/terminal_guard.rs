use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Enter/leave the interactive screen mode. Split out so tests can observe the calls.
pub trait ScreenMode: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct AlternateScreen;

impl ScreenMode for AlternateScreen {
    fn enter(&self) -> io::Result<()> {
        use crossterm::event::EnableMouseCapture;
        use crossterm::execute;
        use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen};

        enter_raw_then(
            enable_raw_mode,
            || execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture),
            disable_raw_mode,
        )
    }

    fn leave(&self) -> io::Result<()> {
        use crossterm::event::DisableMouseCapture;
        use crossterm::execute;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        // Run both steps; report the first failure.
        let raw = disable_raw_mode();
        let screen = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        raw.and(screen)
    }
}

/// Enables raw mode, then runs `enter_screen`; raw mode is switched back off if
/// that fails, since no guard will exist to do it.
fn enter_raw_then(
    enable_raw: impl FnOnce() -> io::Result<()>,
    enter_screen: impl FnOnce() -> io::Result<()>,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    enable_raw()?;
    if let Err(err) = enter_screen() {
        if let Err(undo) = disable_raw() {
            tracing::warn!(error = %undo, "failed to disable raw mode");
        }
        return Err(err);
    }
    Ok(())
}

/// Shared "leave once" handle, usable from the signal thread.
#[derive(Clone)]
pub struct ScreenRestore {
    done: Arc<AtomicBool>,
    mode: Arc<dyn ScreenMode>,
}

impl ScreenRestore {
    pub fn restore(&self) -> io::Result<()> {
        if self.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.mode.leave()
    }
}

/// Leaves the screen mode when dropped.
pub struct TerminalGuard {
    restore: ScreenRestore,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_mode(Arc::new(AlternateScreen))
    }

    pub fn with_mode(mode: Arc<dyn ScreenMode>) -> io::Result<Self> {
        mode.enter()?;
        Ok(Self {
            restore: ScreenRestore {
                done: Arc::new(AtomicBool::new(false)),
                mode,
            },
        })
    }

    pub fn restore_handle(&self) -> ScreenRestore {
        self.restore.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore.restore() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl TerminationSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::Interrupt => 130,
            TerminationSignal::Terminate => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM to `tx`. If the UI loop has not exited within the
/// grace period the terminal is restored and the process exits.
#[cfg(unix)]
pub fn watch_termination_signals(
    restore: ScreenRestore,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::time::Duration;

    const GRACE: Duration = Duration::from_secs(2);

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    std::thread::Builder::new()
        .name("wstree-signals".into())
        .spawn(move || {
            let Some(raw) = signals.forever().next() else {
                return;
            };
            let signal = if raw == SIGINT {
                TerminationSignal::Interrupt
            } else {
                TerminationSignal::Terminate
            };
            tracing::info!(?signal, "termination signal received");
            let _ = tx.send(signal);

            std::thread::sleep(GRACE);
            let _ = restore.restore();
            std::process::exit(signal.exit_code());
        })
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
