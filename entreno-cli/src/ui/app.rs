use crossterm::event::KeyCode;

use crate::services::stats::DashboardStats;
use crate::session::Route;

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Refresh requested; the caller reloads the stats
    pub refresh_requested: bool,
    /// Currently selected panel
    pub selected_panel: Panel,
    /// Selected index in the quick actions panel
    pub selected_index: usize,
    /// Show help overlay
    pub show_help: bool,
    /// Greeting name of the signed-in user
    pub user_name: String,
    pub stats: DashboardStats,
    /// Screen picked from the quick actions
    pub next_route: Option<Route>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Summary,
    Constancy,
    QuickActions,
}

/// Quick actions: key, label, destination
pub const QUICK_ACTIONS: [(char, &str, Route); 5] = [
    ('t', "Rutinas", Route::Routines),
    ('b', "Biblioteca", Route::Exercises),
    ('h', "Historial", Route::History),
    ('c', "Coach IA", Route::Coach),
    ('e', "Estadísticas", Route::Stats),
];

impl App {
    pub fn new(user_name: String, stats: DashboardStats) -> Self {
        Self {
            should_quit: false,
            refresh_requested: false,
            selected_panel: Panel::Summary,
            selected_index: 0,
            show_help: false,
            user_name,
            stats,
            next_route: None,
        }
    }

    pub fn set_stats(&mut self, stats: DashboardStats) {
        self.stats = stats;
        self.refresh_requested = false;
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_requested = true,
            KeyCode::Tab | KeyCode::Right => self.next_panel(),
            KeyCode::BackTab | KeyCode::Left => self.prev_panel(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_panel == Panel::QuickActions
                    && self.selected_index + 1 < QUICK_ACTIONS.len()
                {
                    self.selected_index += 1;
                }
            }
            KeyCode::Enter if self.selected_panel == Panel::QuickActions => {
                self.open(self.selected_index);
            }
            KeyCode::Char(c) => {
                if let Some(index) = QUICK_ACTIONS.iter().position(|(key, _, _)| *key == c) {
                    self.open(index);
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, index: usize) {
        if let Some((_, _, route)) = QUICK_ACTIONS.get(index) {
            self.next_route = Some(route.clone());
            self.should_quit = true;
        }
    }

    fn next_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Summary => Panel::Constancy,
            Panel::Constancy => Panel::QuickActions,
            Panel::QuickActions => Panel::Summary,
        };
        self.selected_index = 0;
    }

    fn prev_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Summary => Panel::QuickActions,
            Panel::Constancy => Panel::Summary,
            Panel::QuickActions => Panel::Constancy,
        };
        self.selected_index = 0;
    }
}
