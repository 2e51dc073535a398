use std::io;
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Frame;
use ratatui::Terminal;

use crate::errors::YarikuriError;

pub mod chart;

#[derive(Debug, Clone, Copy)]
pub enum TuiAction {
    Exit,
}

pub fn key_pressed() -> Option<KeyCode> {
    if poll(Duration::from_millis(50)).ok()? {
        if let Event::Key(key) = read().ok()? {
            if key.kind == KeyEventKind::Press {
                return Some(key.code);
            }
        }
    }
    None
}

pub fn widget_action() -> Option<TuiAction> {
    match key_pressed()? {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Some(TuiAction::Exit),
        _ => None,
    }
}

pub fn open_widget(mut widget: impl TuiWidget) -> Result<(), YarikuriError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| widget.render(f))?;
        let action = widget.handle_events();
        if let Some(TuiAction::Exit) = action {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

pub trait TuiWidget {
    fn handle_events(&mut self) -> Option<TuiAction>;
    fn render(&mut self, frame: &mut Frame);
}
