mod app;
mod game;
mod render;
mod stats;
mod theme;

use app::{App, AppAction, LaunchOptions};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use stats::{format_secs, Statistics};
use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use sudoku_engine::Difficulty;

/// Sudoku in the terminal.
#[derive(Parser)]
#[command(name = "sudoku-term", version, about)]
struct Cli {
    /// Start a new game at this difficulty (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<String>,

    /// Seed the generator for a reproducible puzzle
    #[arg(long)]
    seed: Option<u64>,

    /// Ignore any saved game and start fresh
    #[arg(long)]
    fresh: bool,

    /// Print statistics and exit
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.stats {
        print_stats(&Statistics::load());
        return ExitCode::SUCCESS;
    }

    let difficulty = match cli.difficulty.as_deref() {
        Some(text) => match text.parse::<Difficulty>() {
            Ok(d) => Some(d),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    let options = LaunchOptions {
        difficulty,
        seed: cli.seed,
        fresh: cli.fresh,
    };

    if let Err(err) = run(options) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(options: LaunchOptions) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, options);

    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

fn run_app(stdout: &mut io::Stdout, options: LaunchOptions) -> io::Result<()> {
    let mut app = App::new(options);
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        render::render(stdout, &app)?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }
                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn print_stats(stats: &Statistics) {
    println!("Sudoku statistics");
    println!();
    for difficulty in Difficulty::all() {
        let entry = stats.for_difficulty(difficulty);
        let best = entry
            .best_time_secs
            .map(format_secs)
            .unwrap_or_else(|| "--".to_string());
        println!(
            "{:<8} played {:>3}  solved {:>3} ({:>3}%)  best {}",
            difficulty.to_string(),
            entry.played,
            entry.completed,
            entry.completion_rate(),
            best
        );
    }
    println!();
    println!(
        "overall rate {}% · total play time {}",
        stats.completion_rate(None),
        format_secs(stats.total_play_secs)
    );
}
