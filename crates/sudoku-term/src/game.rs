use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use sudoku_engine::{
    Difficulty, GeneratedPuzzle, Generator, Grid, Hint, Position, Solver, ValidationReport,
};

/// One cell of the player's working grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    /// Current value, 0 = empty.
    pub value: u8,
    /// Part of the generated puzzle; immutable for the player.
    pub given: bool,
    /// Pencil-mark bitmask, bit `v - 1` set means note `v`.
    pub notes: u16,
    /// Flagged by move validation or a whole-grid check.
    pub error: bool,
}

impl CellState {
    #[allow(dead_code)]
    pub fn has_note(&self, value: u8) -> bool {
        self.notes & (1 << (value - 1)) != 0
    }

    fn toggle_note(&mut self, value: u8) {
        self.notes ^= 1 << (value - 1);
    }

    /// Noted values in ascending order.
    pub fn note_values(&self) -> Vec<u8> {
        (1..=9).filter(|&v| self.has_note(v)).collect()
    }
}

/// A game in progress: the player's grid overlaid on a generated puzzle,
/// plus timing and hint accounting.
pub struct Game {
    cells: [[CellState; 9]; 9],
    solution: Grid,
    difficulty: Difficulty,
    /// Unix seconds when this game was first started. Strictly positive
    /// for any real game; the restore path refuses snapshots without it.
    started_at: u64,
    start_instant: Instant,
    elapsed: Duration,
    paused: bool,
    completed: bool,
    hints_used: usize,
}

impl Game {
    /// Start a new game at the given difficulty.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_generator(&mut Generator::new(), difficulty)
    }

    /// Start a new game using a caller-provided generator (lets the CLI
    /// pass a fixed seed).
    pub fn with_generator(generator: &mut Generator, difficulty: Difficulty) -> Self {
        Self::from_parts(generator.generate(difficulty), difficulty)
    }

    fn from_parts(pair: GeneratedPuzzle, difficulty: Difficulty) -> Self {
        let mut cells = [[CellState::default(); 9]; 9];
        for pos in Position::all() {
            let value = pair.puzzle.get(pos);
            cells[pos.row][pos.col] = CellState {
                value,
                given: value != 0,
                notes: 0,
                error: false,
            };
        }

        Self {
            cells,
            solution: pair.solution,
            difficulty,
            started_at: unix_now(),
            start_instant: Instant::now(),
            elapsed: Duration::ZERO,
            paused: false,
            completed: false,
            hints_used: 0,
        }
    }

    pub fn cell(&self, pos: Position) -> CellState {
        self.cells[pos.row][pos.col]
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    /// The player has entered something beyond the givens.
    pub fn has_progress(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|c| (!c.given && c.value != 0) || c.notes != 0)
    }

    pub fn elapsed(&self) -> Duration {
        if self.paused || self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_instant.elapsed()
        }
    }

    /// Elapsed time as MM:SS.
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Snapshot of the current values as an engine grid.
    pub fn values(&self) -> Grid {
        let mut grid = Grid::empty();
        for pos in Position::all() {
            grid.set(pos, self.cells[pos.row][pos.col].value);
        }
        grid
    }

    pub fn toggle_pause(&mut self) {
        if self.completed {
            return;
        }
        if self.paused {
            self.start_instant = Instant::now();
        } else {
            self.elapsed += self.start_instant.elapsed();
        }
        self.paused = !self.paused;
    }

    /// Place `value` (1..=9) at `pos`. The move is committed even when it
    /// conflicts; the cell's error flag records the conflict, mirroring
    /// how the board highlights mistakes instead of rejecting them.
    /// Returns false when the cell is a given or the game is not
    /// accepting input.
    pub fn set_cell(&mut self, pos: Position, value: u8) -> bool {
        if self.completed || self.paused {
            return false;
        }
        if self.cells[pos.row][pos.col].given {
            return false;
        }

        // Validate against the rest of the board, not the cell's old value.
        let mut others = self.values();
        others.set(pos, 0);
        let legal = others.is_legal_move(pos, value);

        let cell = &mut self.cells[pos.row][pos.col];
        cell.value = value;
        cell.error = !legal;
        cell.notes = 0;

        if self.values().is_complete() {
            self.completed = true;
            self.elapsed += self.start_instant.elapsed();
        }

        true
    }

    /// Clear the player's value at `pos`. Notes survive a clear.
    pub fn clear_cell(&mut self, pos: Position) -> bool {
        if self.completed || self.paused {
            return false;
        }

        let cell = &mut self.cells[pos.row][pos.col];
        if cell.given || cell.value == 0 {
            return false;
        }

        cell.value = 0;
        cell.error = false;
        true
    }

    /// Toggle a pencil mark on an empty, non-given cell.
    pub fn toggle_note(&mut self, pos: Position, value: u8) -> bool {
        if self.completed || self.paused {
            return false;
        }

        let cell = &mut self.cells[pos.row][pos.col];
        if cell.given || cell.value != 0 {
            return false;
        }

        cell.toggle_note(value);
        true
    }

    /// Ask the engine for a hint and apply it. Counts against the player
    /// whenever a hint was produced.
    pub fn hint(&mut self) -> Option<Hint> {
        if self.completed || self.paused {
            return None;
        }

        let solver = Solver::new();
        let hint = solver.find_hint(&self.values(), &self.solution)?;
        self.hints_used += 1;
        self.set_cell(hint.pos, hint.value);
        Some(hint)
    }

    /// Re-validate the whole board and refresh every cell's error flag.
    pub fn check(&mut self) -> ValidationReport {
        let report = self.values().validate();
        for pos in Position::all() {
            self.cells[pos.row][pos.col].error = report.errors.contains(&pos);
        }
        report
    }

    /// Conflicting positions for the cell at `pos` in the current state.
    pub fn conflicts(&self, pos: Position) -> Vec<Position> {
        self.values().conflicts_for(pos)
    }

    /// Wipe player progress but keep the same puzzle; the clock restarts.
    pub fn restart(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if !cell.given {
                cell.value = 0;
            }
            cell.notes = 0;
            cell.error = false;
        }
        self.started_at = unix_now();
        self.start_instant = Instant::now();
        self.elapsed = Duration::ZERO;
        self.paused = false;
        self.completed = false;
        self.hints_used = 0;
    }

    /// Serializable state of an in-progress game.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells,
            solution: self.solution.to_line(),
            difficulty: self.difficulty,
            started_at: self.started_at,
            elapsed_secs: self.elapsed().as_secs(),
            hints_used: self.hints_used,
        }
    }

    /// Rebuild a game from a saved snapshot. Refuses snapshots that were
    /// never actually started (`started_at == 0`) or whose solution does
    /// not parse. A resumed game starts paused.
    pub fn resume(snapshot: Snapshot) -> Option<Self> {
        if snapshot.started_at == 0 {
            return None;
        }
        let solution = Grid::from_string(&snapshot.solution)?;

        Some(Self {
            cells: snapshot.cells,
            solution,
            difficulty: snapshot.difficulty,
            started_at: snapshot.started_at,
            start_instant: Instant::now(),
            elapsed: Duration::from_secs(snapshot.elapsed_secs),
            paused: true,
            completed: false,
            hints_used: snapshot.hints_used,
        })
    }
}

/// Saved form of an in-progress game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: [[CellState; 9]; 9],
    pub solution: String,
    pub difficulty: Difficulty,
    pub started_at: u64,
    pub elapsed_secs: u64,
    pub hints_used: usize,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    /// A game whose puzzle is the known solution minus the given holes.
    fn game_with_holes(holes: &[Position]) -> Game {
        let solution = Grid::from_string(SOLUTION).unwrap();
        let mut puzzle = solution.clone();
        for &pos in holes {
            puzzle.set(pos, 0);
        }
        Game::from_parts(GeneratedPuzzle { puzzle, solution }, Difficulty::Easy)
    }

    #[test]
    fn givens_are_immutable() {
        let mut game = game_with_holes(&[Position::new(0, 0)]);
        assert!(game.cell(Position::new(1, 1)).given);
        assert!(!game.set_cell(Position::new(1, 1), 9));
        assert!(!game.clear_cell(Position::new(1, 1)));
        assert!(!game.toggle_note(Position::new(1, 1), 3));
    }

    #[test]
    fn legal_move_leaves_no_error() {
        let mut game = game_with_holes(&[Position::new(0, 0)]);
        assert!(game.set_cell(Position::new(0, 0), 5));
        let cell = game.cell(Position::new(0, 0));
        assert_eq!(cell.value, 5);
        assert!(!cell.error);
    }

    #[test]
    fn conflicting_move_is_committed_with_error() {
        let mut game = game_with_holes(&[Position::new(0, 0)]);
        // 3 already sits at (0,1).
        assert!(game.set_cell(Position::new(0, 0), 3));
        let cell = game.cell(Position::new(0, 0));
        assert_eq!(cell.value, 3);
        assert!(cell.error);

        // Overwriting with the right value clears the flag.
        assert!(game.set_cell(Position::new(0, 0), 5));
        assert!(!game.cell(Position::new(0, 0)).error);
    }

    #[test]
    fn notes_toggle_and_clear_on_placement() {
        let mut game = game_with_holes(&[Position::new(0, 0)]);
        let pos = Position::new(0, 0);

        assert!(game.toggle_note(pos, 2));
        assert!(game.toggle_note(pos, 7));
        assert_eq!(game.cell(pos).note_values(), vec![2, 7]);

        assert!(game.toggle_note(pos, 2));
        assert_eq!(game.cell(pos).note_values(), vec![7]);

        assert!(game.set_cell(pos, 5));
        assert_eq!(game.cell(pos).notes, 0);
        // Notes are rejected once a value is present.
        assert!(!game.toggle_note(pos, 1));
    }

    #[test]
    fn completing_the_grid_finishes_the_game() {
        let pos = Position::new(4, 4);
        let mut game = game_with_holes(&[pos]);
        assert!(!game.is_completed());

        let want = Grid::from_string(SOLUTION).unwrap().get(pos);
        assert!(game.set_cell(pos, want));
        assert!(game.is_completed());

        // No further input is accepted.
        assert!(!game.clear_cell(pos));
    }

    #[test]
    fn hint_fills_an_empty_cell_and_counts() {
        let pos = Position::new(2, 3);
        let mut game = game_with_holes(&[pos]);

        let hint = game.hint().unwrap();
        assert_eq!(hint.pos, pos);
        assert_eq!(hint.value, Grid::from_string(SOLUTION).unwrap().get(pos));
        assert_eq!(game.hints_used(), 1);
        assert!(game.is_completed());
    }

    #[test]
    fn check_flags_and_unflags() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 3);
        let mut game = game_with_holes(&[a, b]);

        // Duplicate 6s in row 0 ((0,3) would correctly hold 6).
        game.set_cell(a, 6);
        game.set_cell(b, 6);
        let report = game.check();
        assert!(!report.is_valid);
        assert!(game.cell(a).error);
        assert!(game.cell(b).error);

        game.set_cell(a, 5);
        let report = game.check();
        assert!(report.is_valid);
        assert!(!game.cell(a).error);
        assert!(!game.cell(b).error);
    }

    #[test]
    fn restart_keeps_givens_only() {
        let pos = Position::new(0, 0);
        let mut game = game_with_holes(&[pos, Position::new(5, 5)]);
        game.set_cell(pos, 3);
        game.toggle_note(Position::new(5, 5), 4);
        game.hint();

        game.restart();
        assert_eq!(game.cell(pos).value, 0);
        assert_eq!(game.cell(Position::new(5, 5)).notes, 0);
        assert_eq!(game.hints_used(), 0);
        assert!(!game.has_progress());
    }

    #[test]
    fn snapshot_round_trip() {
        let pos = Position::new(0, 0);
        let mut game = game_with_holes(&[pos, Position::new(7, 7)]);
        game.set_cell(pos, 3);
        game.toggle_note(Position::new(7, 7), 9);

        let json = serde_json::to_string(&game.snapshot()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        let restored = Game::resume(snapshot).unwrap();

        assert!(restored.is_paused());
        assert_eq!(restored.difficulty(), Difficulty::Easy);
        assert_eq!(restored.cell(pos).value, 3);
        assert!(restored.cell(pos).error); // 3 conflicts with (0,1)
        assert!(restored.cell(Position::new(7, 7)).has_note(9));
        assert_eq!(restored.values(), game.values());
    }

    #[test]
    fn never_started_snapshot_is_refused() {
        let game = game_with_holes(&[Position::new(0, 0)]);
        let mut snapshot = game.snapshot();
        snapshot.started_at = 0;
        assert!(Game::resume(snapshot).is_none());
    }
}
