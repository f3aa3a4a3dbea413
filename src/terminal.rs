//! Terminal setup and teardown.
//!
//! Raw mode and the alternate screen have to be undone on every way out of
//! the program: normal quit, an error bubbling out of the main loop, and a
//! panic. [`RestoreGuard`] covers the first two, [`install_hooks`] the last.

use color_eyre::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> Result<Tui> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen, crossterm::cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

/// Runs `cleanup` when dropped.
pub struct RestoreGuard<F: FnMut()> {
    cleanup: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    pub fn new(cleanup: F) -> Self {
        Self { cleanup }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.cleanup)();
    }
}

/// Installs color-eyre, then a panic hook that runs `cleanup` before
/// color-eyre's report. color-eyre replaces whatever hook is set, so the
/// order matters.
pub fn install_hooks<F>(cleanup: F) -> Result<()>
where
    F: Fn() + Send + Sync + 'static,
{
    color_eyre::install()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        cleanup();
        original_hook(panic_info);
    }));
    Ok(())
}
