use crate::game::{Game, Snapshot};
use crate::stats::Statistics;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use std::fs;
use std::path::PathBuf;
use sudoku_engine::{Difficulty, Generator, Position};

/// Result of handling a key press.
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Playing,
    /// Difficulty picker for a new game, drawn over the board.
    Menu,
    Stats,
}

/// Settings from the command line.
#[derive(Debug, Default)]
pub struct LaunchOptions {
    pub difficulty: Option<Difficulty>,
    pub seed: Option<u64>,
    /// Skip restoring a saved game.
    pub fresh: bool,
}

/// The application state.
pub struct App {
    pub game: Game,
    pub cursor: Position,
    pub notes_mode: bool,
    pub screen: Screen,
    pub menu_selection: usize,
    pub theme: Theme,
    pub stats: Statistics,
    pub message: Option<String>,
    message_timer: u32,
    /// Guards against double-recording one game in the statistics.
    game_recorded: bool,
    light_theme: bool,
}

impl App {
    pub fn new(options: LaunchOptions) -> Self {
        let forced_new =
            options.difficulty.is_some() || options.seed.is_some() || options.fresh;

        let mut restored = false;
        let game = if forced_new {
            let difficulty = options.difficulty.unwrap_or(Difficulty::Easy);
            match options.seed {
                Some(seed) => {
                    Game::with_generator(&mut Generator::with_seed(seed), difficulty)
                }
                None => Game::new(difficulty),
            }
        } else if let Some(game) = Self::restore_game() {
            restored = true;
            game
        } else {
            Game::new(Difficulty::Easy)
        };

        let mut app = Self {
            game,
            cursor: Position::new(4, 4),
            notes_mode: false,
            screen: Screen::Playing,
            menu_selection: 0,
            theme: Theme::dark(),
            stats: Statistics::load(),
            message: None,
            message_timer: 0,
            game_recorded: false,
            light_theme: false,
        };

        if restored {
            app.show_message("Resumed saved game - press p to continue");
        }
        app.autosave();
        app
    }

    /// Update timers and detect completion (called every tick).
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen == Screen::Playing && self.game.is_completed() && !self.game_recorded {
            self.game_recorded = true;
            self.stats.record_game(
                self.game.difficulty(),
                self.game.elapsed().as_secs(),
                true,
                self.game.hints_used(),
            );
            self.stats.save();
            let _ = fs::remove_file(Self::save_path());
            self.show_message(&format!("Solved in {}!", self.game.elapsed_string()));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen {
            Screen::Playing => self.handle_playing_key(key),
            Screen::Menu => self.handle_menu_key(key),
            Screen::Stats => self.handle_stats_key(key),
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.autosave();
                return AppAction::Quit;
            }

            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            KeyCode::Char(c @ '1'..='9') => {
                let value = c as u8 - b'0';
                if self.notes_mode {
                    if self.game.toggle_note(self.cursor, value) {
                        self.autosave();
                    }
                } else if self.game.set_cell(self.cursor, value) {
                    if self.game.cell(self.cursor).error {
                        self.show_message("That conflicts with another cell");
                    }
                    self.autosave();
                }
            }

            KeyCode::Char('0') | KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
                if self.game.clear_cell(self.cursor) {
                    self.autosave();
                }
            }

            KeyCode::Char('n') => {
                self.notes_mode = !self.notes_mode;
                self.show_message(if self.notes_mode {
                    "Notes mode on"
                } else {
                    "Notes mode off"
                });
            }

            KeyCode::Char('H') => match self.game.hint() {
                Some(hint) => {
                    self.cursor = hint.pos;
                    self.show_message(&format!(
                        "Hint: {} at row {}, column {}",
                        hint.value,
                        hint.pos.row + 1,
                        hint.pos.col + 1
                    ));
                    self.autosave();
                }
                None => self.show_message("No hint available"),
            },

            KeyCode::Char('c') => {
                let report = self.game.check();
                if report.is_valid {
                    self.show_message("No conflicts so far");
                } else {
                    self.show_message(&format!(
                        "{} conflicting cell(s) marked",
                        report.errors.len()
                    ));
                }
                self.autosave();
            }

            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.game.toggle_pause();
                self.show_message(if self.game.is_paused() {
                    "Paused"
                } else {
                    "Resumed"
                });
            }

            KeyCode::Char('r') => {
                self.game.restart();
                self.show_message("Puzzle restarted");
                self.autosave();
            }

            KeyCode::Char('t') => {
                self.light_theme = !self.light_theme;
                self.theme = if self.light_theme {
                    Theme::light()
                } else {
                    Theme::dark()
                };
            }

            KeyCode::Char('N') => {
                self.menu_selection = Difficulty::all()
                    .iter()
                    .position(|&d| d == self.game.difficulty())
                    .unwrap_or(0);
                self.screen = Screen::Menu;
            }

            KeyCode::Char('i') => {
                self.screen = Screen::Stats;
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        let levels = Difficulty::all();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Playing;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selection =
                    (self.menu_selection + levels.len() - 1) % levels.len();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selection = (self.menu_selection + 1) % levels.len();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let difficulty = levels[self.menu_selection];
                self.new_game(difficulty);
                self.screen = Screen::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_stats_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('i') => {
                self.screen = Screen::Playing;
            }
            KeyCode::Char('R') => {
                self.stats.reset();
                self.stats.save();
                self.show_message("Statistics reset");
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Start a new game, recording the abandoned one first.
    fn new_game(&mut self, difficulty: Difficulty) {
        if !self.game.is_completed() && self.game.has_progress() && !self.game_recorded {
            self.stats.record_game(
                self.game.difficulty(),
                self.game.elapsed().as_secs(),
                false,
                self.game.hints_used(),
            );
            self.stats.save();
        }

        self.game = Game::new(difficulty);
        self.cursor = Position::new(4, 4);
        self.notes_mode = false;
        self.game_recorded = false;
        self.show_message(&format!("New {difficulty} game"));
        self.autosave();
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let row = (self.cursor.row as i32 + row_delta).clamp(0, 8) as usize;
        let col = (self.cursor.col as i32 + col_delta).clamp(0, 8) as usize;
        self.cursor = Position::new(row, col);
    }

    pub fn show_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
        self.message_timer = 30; // ~3 seconds at the playing tick rate
    }

    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku-term-save.json")
    }

    /// Persist the in-progress game after every committed mutation; a
    /// finished game removes the snapshot instead.
    fn autosave(&self) {
        if self.game.is_completed() {
            let _ = fs::remove_file(Self::save_path());
            return;
        }
        if let Ok(json) = serde_json::to_string(&self.game.snapshot()) {
            let _ = fs::write(Self::save_path(), json);
        }
    }

    fn restore_game() -> Option<Game> {
        let json = fs::read_to_string(Self::save_path()).ok()?;
        let snapshot: Snapshot = serde_json::from_str(&json).ok()?;
        Game::resume(snapshot)
    }
}
