//! Raw-mode terminal lifecycle for the binary, including the panic path.

use color_eyre::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> Result<Tui> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal(mut terminal: Tui) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    Ok(())
}

/// Installs color-eyre, then a panic hook that leaves the alternate screen
/// before color-eyre prints the report.
pub fn install_hooks() -> Result<()> {
    install_hooks_with(|| {
        crossterm::terminal::disable_raw_mode().ok();
        crossterm::execute!(
            io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        )
        .ok();
    })
}

/// Same as [`install_hooks`] with a custom cleanup step.
///
/// `color_eyre::install` replaces the panic hook, so ours has to be chained
/// on top of it afterwards.
pub fn install_hooks_with<F>(cleanup: F) -> Result<()>
where
    F: Fn() + Send + Sync + 'static,
{
    color_eyre::install()?;

    let eyre_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        cleanup();
        eyre_hook(panic_info);
    }));
    Ok(())
}
