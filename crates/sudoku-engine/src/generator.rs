use crate::grid::{Difficulty, Grid, Position};
use crate::rng::SmallRng;
use crate::solver::{self, Solver};

/// A freshly generated puzzle and its unique solution. The two grids are
/// independent values; mutating one never affects the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    pub puzzle: Grid,
    pub solution: Grid,
}

/// Puzzle generator.
///
/// Fills an empty grid through randomized backtracking, then removes
/// cells one at a time while a counting search confirms the puzzle still
/// has exactly one solution.
pub struct Generator {
    rng: SmallRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible puzzles in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::with_seed(seed),
        }
    }

    /// Produce a puzzle for the requested difficulty.
    ///
    /// Removal stops at the difficulty's target or when the attempt
    /// budget (three times the target) runs out; a budget-limited puzzle
    /// simply keeps more givens than asked, it is never invalid.
    pub fn generate(&mut self, difficulty: Difficulty) -> GeneratedPuzzle {
        let solution = self.fill_solution();
        let mut puzzle = solution.clone();
        self.remove_cells(&mut puzzle, difficulty.cells_to_remove());
        GeneratedPuzzle { puzzle, solution }
    }

    /// Complete a grid from scratch with shuffled candidate order.
    fn fill_solution(&mut self) -> Grid {
        let mut grid = Grid::empty();
        // An empty grid always admits a completion; the shuffle only
        // varies which completion comes out.
        assert!(
            solver::fill_random(&mut grid, &mut self.rng),
            "empty grid must be completable"
        );
        grid
    }

    /// Clear up to `target` random cells, keeping each removal only if
    /// the puzzle still has a unique solution.
    fn remove_cells(&mut self, puzzle: &mut Grid, target: usize) {
        let solver = Solver::new();
        let budget = target * 3;
        let mut removed = 0;
        let mut attempts = 0;

        while removed < target && attempts < budget {
            attempts += 1;

            let pos = Position::new(self.rng.below(9), self.rng.below(9));
            let value = puzzle.get(pos);
            if value == 0 {
                continue;
            }

            puzzle.set(pos, 0);
            if solver.has_unique_solution(puzzle) {
                removed += 1;
            } else {
                puzzle.set(pos, value);
            }
        }
    }
}
