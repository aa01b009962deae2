use crate::grid::{Grid, Position};
use crate::rng::SmallRng;

/// How a hint was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    /// The cell had exactly one legal candidate.
    ForcedCell,
    /// No forced cell existed; a random empty cell was revealed from the
    /// known solution.
    FromSolution,
}

/// A suggested placement for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub pos: Position,
    pub value: u8,
    pub kind: HintKind,
}

/// Node budget for the solution-counting search. A pathological grid
/// aborts the count instead of blocking; [`Solver::has_unique_solution`]
/// then reports `false` and the generator rejects the removal that led
/// here.
const COUNT_NODE_BUDGET: u64 = 2_000_000;

/// Exhaustive backtracking solver. Stateless; every call works on its
/// own copy of the input grid.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Find a completion of the grid, trying candidates in ascending
    /// order. Returns `None` when no full assignment exists.
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        let mut working = grid.clone();
        if solve_ordered(&mut working) {
            Some(working)
        } else {
            None
        }
    }

    /// Count completions, stopping as soon as `limit` is reached.
    ///
    /// The count may stop short of `limit` on grids whose search exceeds
    /// the internal node budget; for uniqueness decisions use
    /// [`Solver::has_unique_solution`], which treats an aborted search as
    /// not proven unique.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut working = grid.clone();
        let mut search = CountSearch::new(limit);
        search.run(&mut working);
        search.count
    }

    /// True iff the grid has exactly one completion, proven within the
    /// node budget.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        let mut working = grid.clone();
        let mut search = CountSearch::new(2);
        search.run(&mut working);
        search.count == 1 && !search.aborted
    }

    /// Suggest a placement for an empty cell.
    ///
    /// Scans for a forced cell first (exactly one legal candidate), which
    /// makes the most instructive hint. Absent one, reveals a uniformly
    /// random empty cell from `solution`. Returns `None` on a full grid.
    pub fn find_hint(&self, grid: &Grid, solution: &Grid) -> Option<Hint> {
        let empty = grid.empty_positions();
        if empty.is_empty() {
            return None;
        }

        for &pos in &empty {
            let mut candidates = 0;
            let mut sole = 0;
            for value in 1..=9 {
                if grid.is_value_legal(pos, value) {
                    candidates += 1;
                    sole = value;
                    if candidates > 1 {
                        break;
                    }
                }
            }
            if candidates == 1 {
                return Some(Hint {
                    pos,
                    value: sole,
                    kind: HintKind::ForcedCell,
                });
            }
        }

        let mut rng = SmallRng::from_entropy();
        let pos = empty[rng.below(empty.len())];
        Some(Hint {
            pos,
            value: solution.get(pos),
            kind: HintKind::FromSolution,
        })
    }
}

/// Recursive fill with candidates tried in ascending order. Mutates
/// `grid` in place; on failure every touched cell is reset to 0.
fn solve_ordered(grid: &mut Grid) -> bool {
    let Some(pos) = grid.first_empty() else {
        return true;
    };

    for value in 1..=9 {
        if grid.is_value_legal(pos, value) {
            grid.set(pos, value);
            if solve_ordered(grid) {
                return true;
            }
            grid.set(pos, 0);
        }
    }

    false
}

/// Recursive fill with the candidate domain shuffled at every cell.
/// Running this on an empty grid yields a varied complete solution.
pub(crate) fn fill_random(grid: &mut Grid, rng: &mut SmallRng) -> bool {
    let Some(pos) = grid.first_empty() else {
        return true;
    };

    let mut domain: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    rng.shuffle(&mut domain);

    for &value in &domain {
        if grid.is_value_legal(pos, value) {
            grid.set(pos, value);
            if fill_random(grid, rng) {
                return true;
            }
            grid.set(pos, 0);
        }
    }

    false
}

/// Backtracking search that keeps going after the first solution.
struct CountSearch {
    count: usize,
    limit: usize,
    nodes: u64,
    aborted: bool,
}

impl CountSearch {
    fn new(limit: usize) -> Self {
        Self {
            count: 0,
            limit,
            nodes: 0,
            aborted: false,
        }
    }

    fn run(&mut self, grid: &mut Grid) {
        if self.count >= self.limit || self.aborted {
            return;
        }

        self.nodes += 1;
        if self.nodes > COUNT_NODE_BUDGET {
            self.aborted = true;
            return;
        }

        let Some(pos) = grid.first_empty() else {
            self.count += 1;
            return;
        };

        for value in 1..=9 {
            if grid.is_value_legal(pos, value) {
                grid.set(pos, value);
                self.run(grid);
                grid.set(pos, 0);
                if self.count >= self.limit || self.aborted {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn solves_known_puzzle() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let solver = Solver::new();
        let solved = solver.solve(&grid).unwrap();
        assert_eq!(solved.to_line(), SOLUTION);
    }

    #[test]
    fn solves_empty_grid() {
        let solver = Solver::new();
        let solved = solver.solve(&Grid::empty()).unwrap();
        assert_eq!(solved.filled_count(), 81);
        assert!(solved.validate().is_valid);
    }

    #[test]
    fn reports_unsolvable_grid() {
        // (0,0) is empty, its row holds 1..=8 and its column holds 9, so
        // no candidate remains.
        let mut grid = Grid::empty();
        for col in 1..9 {
            grid.set(Position::new(0, col), col as u8);
        }
        grid.set(Position::new(1, 0), 9);

        let solver = Solver::new();
        assert!(solver.solve(&grid).is_none());
    }

    #[test]
    fn counts_solutions_up_to_limit() {
        let solver = Solver::new();
        assert_eq!(solver.count_solutions(&Grid::empty(), 1), 1);
        assert_eq!(solver.count_solutions(&Grid::empty(), 2), 2);

        let grid = Grid::from_string(PUZZLE).unwrap();
        assert_eq!(solver.count_solutions(&grid, 2), 1);
    }

    #[test]
    fn uniqueness_check() {
        let solver = Solver::new();
        let grid = Grid::from_string(PUZZLE).unwrap();
        assert!(solver.has_unique_solution(&grid));
        assert!(!solver.has_unique_solution(&Grid::empty()));
    }

    #[test]
    fn random_fill_is_seeded_and_valid() {
        let mut a = Grid::empty();
        let mut b = Grid::empty();
        assert!(fill_random(&mut a, &mut SmallRng::with_seed(11)));
        assert!(fill_random(&mut b, &mut SmallRng::with_seed(11)));
        assert_eq!(a, b);
        assert_eq!(a.filled_count(), 81);
        assert!(a.validate().is_valid);

        let mut c = Grid::empty();
        assert!(fill_random(&mut c, &mut SmallRng::with_seed(12)));
        assert_ne!(a, c);
    }

    #[test]
    fn hint_on_full_grid_is_none() {
        let solution = Grid::from_string(SOLUTION).unwrap();
        let solver = Solver::new();
        assert!(solver.find_hint(&solution, &solution).is_none());
    }

    #[test]
    fn hint_for_single_missing_cell_is_forced() {
        let solution = Grid::from_string(SOLUTION).unwrap();
        let mut grid = solution.clone();
        grid.set(Position::new(0, 0), 0);

        let solver = Solver::new();
        let hint = solver.find_hint(&grid, &solution).unwrap();
        assert_eq!(hint.pos, Position::new(0, 0));
        assert_eq!(hint.value, solution.get(hint.pos));
        assert_eq!(hint.kind, HintKind::ForcedCell);
    }

    #[test]
    fn hint_is_empty_legal_and_matches_solution() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let solution = Grid::from_string(SOLUTION).unwrap();
        let solver = Solver::new();

        let hint = solver.find_hint(&grid, &solution).unwrap();
        assert!(grid.is_empty_at(hint.pos));
        assert_eq!(hint.value, solution.get(hint.pos));
        assert!(grid.is_value_legal(hint.pos, hint.value));
    }

    #[test]
    fn hint_falls_back_to_solution_when_nothing_is_forced() {
        // An empty grid has nine candidates everywhere.
        let solution = Grid::from_string(SOLUTION).unwrap();
        let solver = Solver::new();

        let hint = solver.find_hint(&Grid::empty(), &solution).unwrap();
        assert_eq!(hint.kind, HintKind::FromSolution);
        assert_eq!(hint.value, solution.get(hint.pos));
    }
}
