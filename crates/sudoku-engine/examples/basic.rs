//! Basic tour of the engine: generate, validate, hint, solve.

use sudoku_engine::{Difficulty, Generator, Grid, Solver};

fn main() {
    println!("Generating an easy puzzle...\n");
    let mut generator = Generator::new();
    let pair = generator.generate(Difficulty::Easy);

    println!("Puzzle ({} givens):", pair.puzzle.filled_count());
    println!("{}", pair.puzzle);
    println!("Solution:");
    println!("{}", pair.solution);

    let solver = Solver::new();
    println!(
        "Puzzle has a unique solution: {}",
        solver.has_unique_solution(&pair.puzzle)
    );

    if let Some(hint) = solver.find_hint(&pair.puzzle, &pair.solution) {
        println!(
            "Hint: place {} at row {}, column {} ({:?})",
            hint.value,
            hint.pos.row + 1,
            hint.pos.col + 1,
            hint.kind
        );
    }

    println!("\n--- Parsing a puzzle from a string ---\n");
    let line = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    if let Some(grid) = Grid::from_string(line) {
        println!("{}", grid);
        println!("Valid so far: {}", grid.validate().is_valid);
        println!("Solutions (up to 2): {}", solver.count_solutions(&grid, 2));
        if let Some(solved) = solver.solve(&grid) {
            println!("Solved:\n{}", solved);
        }
    }
}
