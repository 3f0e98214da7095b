use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Keeps the terminal in raw mode on the alternate screen while alive.
///
/// Dropping the guard restores the terminal best-effort.
#[derive(Debug)]
pub struct TerminalGuard {
    _entered: (),
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen, and returns a ratatui terminal.
    pub fn enter(title: &str) -> io::Result<(Self, AppTerminal)> {
        enable_raw_mode()?;
        let guard = Self { _entered: () };

        execute!(io::stdout(), EnterAlternateScreen, Hide, SetTitle(title))?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}
