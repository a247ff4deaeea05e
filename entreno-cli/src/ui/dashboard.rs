use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Flex, Layout, Rect},
    Frame, Terminal,
};
use std::io;

use super::app::{App, Panel};
use super::widgets;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Dashboard {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("No se pudo activar el modo raw")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("No se pudo preparar la terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("No se pudo crear la terminal")?;

        Ok(Self { terminal })
    }

    /// Draw and handle keys until the app quits or asks for a refresh
    pub fn run(&mut self, app: &mut App) -> Result<()> {
        loop {
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit || app.refresh_requested {
                break;
            }
        }

        if app.refresh_requested {
            self.terminal.draw(|f| ui(f, app))?;
        }
        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("No se pudo desactivar el modo raw")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("No se pudo restaurar la terminal")?;
        self.terminal.show_cursor().context("No se pudo mostrar el cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let [body, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(size);
    let [left, actions] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    let [summary, chart] = Layout::vertical([Constraint::Length(7), Constraint::Min(0)]).areas(left);

    let buf = f.buffer_mut();
    widgets::render_summary(
        summary,
        buf,
        &app.user_name,
        &app.stats,
        app.selected_panel == Panel::Summary,
    );
    widgets::render_constancy_chart(chart, buf, &app.stats, app.selected_panel == Panel::Constancy);
    widgets::render_quick_actions(
        actions,
        buf,
        app.selected_index,
        app.selected_panel == Panel::QuickActions,
    );
    widgets::render_status_bar(status, buf, app.refresh_requested);

    if app.show_help {
        widgets::render_help_overlay(centered(60, 80, size), buf);
    }
}

/// `percent_x` by `percent_y` box in the middle of `area`
fn centered(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
