use crate::app::{App, Screen};
use crate::stats::format_secs;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{
        Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use sudoku_engine::{Difficulty, Position};

/// Top-left corner of the grid.
const GRID_X: u16 = 2;
const GRID_Y: u16 = 1;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    queue!(stdout, ResetColor, Clear(ClearType::All))?;

    match app.screen {
        Screen::Playing | Screen::Menu => {
            render_board(stdout, app)?;
            render_status(stdout, app)?;
            if app.screen == Screen::Menu {
                render_menu(stdout, app)?;
            }
        }
        Screen::Stats => render_stats(stdout, app)?,
    }

    stdout.flush()
}

/// Screen column of a cell (two columns per cell, a gap at box borders).
fn cell_x(col: usize) -> u16 {
    GRID_X + 2 + (col as u16) * 2 + (col as u16 / 3) * 2
}

/// Screen row of a cell (one row per cell, a separator at box borders).
fn cell_y(row: usize) -> u16 {
    GRID_Y + 1 + (row as u16) + (row as u16 / 3)
}

fn render_board(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;

    // Frame.
    queue!(stdout, SetForegroundColor(theme.frame))?;
    queue!(
        stdout,
        MoveTo(GRID_X, GRID_Y),
        Print("┌───────┬───────┬───────┐")
    )?;
    for band in 1..3 {
        queue!(
            stdout,
            MoveTo(GRID_X, GRID_Y + band * 4),
            Print("├───────┼───────┼───────┤")
        )?;
    }
    queue!(
        stdout,
        MoveTo(GRID_X, GRID_Y + 12),
        Print("└───────┴───────┴───────┘")
    )?;
    for row in 0..9 {
        let y = cell_y(row);
        for x in [GRID_X, GRID_X + 8, GRID_X + 16, GRID_X + 24] {
            queue!(stdout, MoveTo(x, y), Print("│"))?;
        }
    }

    // Conflicts of the cursor cell drive the red highlight.
    let conflicts = app.game.conflicts(app.cursor);

    for row in 0..9 {
        for col in 0..9 {
            let pos = Position::new(row, col);
            let cell = app.game.cell(pos);

            let background = if pos == app.cursor {
                Some(theme.cursor_bg)
            } else if conflicts.contains(&pos) {
                Some(theme.conflict_bg)
            } else if pos.row == app.cursor.row
                || pos.col == app.cursor.col
                || pos.box_index() == app.cursor.box_index()
            {
                Some(theme.peer_bg)
            } else {
                None
            };

            let (text, foreground) = if app.game.is_paused() {
                (" ".to_string(), theme.info)
            } else if cell.value == 0 {
                ("·".to_string(), theme.info)
            } else if cell.error {
                (cell.value.to_string(), theme.error)
            } else if cell.given {
                (cell.value.to_string(), theme.given)
            } else {
                (cell.value.to_string(), theme.entry)
            };

            queue!(stdout, MoveTo(cell_x(col), cell_y(row)))?;
            match background {
                Some(bg) => queue!(stdout, SetBackgroundColor(bg))?,
                None => queue!(stdout, ResetColor)?,
            }
            if cell.given && !app.game.is_paused() {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                stdout,
                SetForegroundColor(foreground),
                Print(text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
    }

    Ok(())
}

fn render_status(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let y = GRID_Y + 13;

    let mut line = format!(
        "{} · {} · hints {}",
        game.difficulty(),
        game.elapsed_string(),
        game.hints_used()
    );
    if app.notes_mode {
        line.push_str(" · notes");
    }
    if game.is_paused() {
        line.push_str(" · paused");
    }
    queue!(
        stdout,
        MoveTo(GRID_X, y),
        SetForegroundColor(theme.info),
        Print(line)
    )?;

    if game.is_completed() {
        queue!(
            stdout,
            MoveTo(GRID_X, y + 1),
            SetForegroundColor(theme.success),
            Print(format!("Solved in {}!", game.elapsed_string()))
        )?;
    } else {
        let notes = game.cell(app.cursor).note_values();
        if !notes.is_empty() {
            let marks: Vec<String> = notes.iter().map(u8::to_string).collect();
            queue!(
                stdout,
                MoveTo(GRID_X, y + 1),
                SetForegroundColor(theme.info),
                Print(format!("notes: {}", marks.join(" ")))
            )?;
        }
    }

    if let Some(message) = &app.message {
        queue!(
            stdout,
            MoveTo(GRID_X, y + 2),
            SetForegroundColor(theme.key),
            Print(message)
        )?;
    }

    queue!(
        stdout,
        MoveTo(GRID_X, y + 4),
        SetForegroundColor(theme.info),
        Print("arrows/hjkl move · 1-9 place · 0/x clear · n notes · H hint · c check"),
        MoveTo(GRID_X, y + 5),
        Print("p pause · r restart · N new game · i stats · t theme · q quit"),
        ResetColor
    )?;

    Ok(())
}

fn render_menu(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let x = GRID_X + 30;

    queue!(
        stdout,
        MoveTo(x, GRID_Y + 1),
        SetForegroundColor(theme.given),
        SetAttribute(Attribute::Bold),
        Print("New game"),
        SetAttribute(Attribute::Reset)
    )?;

    for (i, difficulty) in Difficulty::all().iter().enumerate() {
        let selected = i == app.menu_selection;
        let marker = if selected { "> " } else { "  " };
        let color = if selected { theme.key } else { theme.info };
        queue!(
            stdout,
            MoveTo(x, GRID_Y + 3 + i as u16),
            SetForegroundColor(color),
            Print(format!(
                "{marker}{difficulty} ({} givens)",
                81 - difficulty.cells_to_remove()
            ))
        )?;
    }

    queue!(
        stdout,
        MoveTo(x, GRID_Y + 7),
        SetForegroundColor(theme.info),
        Print("enter start · esc cancel"),
        ResetColor
    )?;

    Ok(())
}

fn render_stats(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let stats = &app.stats;

    queue!(
        stdout,
        MoveTo(GRID_X, GRID_Y),
        SetForegroundColor(theme.given),
        SetAttribute(Attribute::Bold),
        Print("Statistics"),
        SetAttribute(Attribute::Reset)
    )?;

    queue!(
        stdout,
        MoveTo(GRID_X, GRID_Y + 2),
        SetForegroundColor(theme.info),
        Print(format!(
            "{:<8} {:>7} {:>7} {:>6} {:>7} {:>7} {:>7}",
            "", "played", "solved", "rate", "best", "avg", "hints"
        ))
    )?;

    for (i, difficulty) in Difficulty::all().iter().enumerate() {
        let entry = stats.for_difficulty(*difficulty);
        let best = entry
            .best_time_secs
            .map(format_secs)
            .unwrap_or_else(|| "--".to_string());
        let avg = entry
            .average_time_secs()
            .map(format_secs)
            .unwrap_or_else(|| "--".to_string());
        queue!(
            stdout,
            MoveTo(GRID_X, GRID_Y + 3 + i as u16),
            SetForegroundColor(theme.given),
            Print(format!(
                "{:<8} {:>7} {:>7} {:>5}% {:>7} {:>7} {:>7}",
                difficulty.to_string(),
                entry.played,
                entry.completed,
                entry.completion_rate(),
                best,
                avg,
                entry.total_hints
            ))
        )?;
    }

    queue!(
        stdout,
        MoveTo(GRID_X, GRID_Y + 7),
        SetForegroundColor(theme.info),
        Print(format!(
            "overall rate {}% · total play time {}",
            stats.completion_rate(None),
            format_secs(stats.total_play_secs)
        )),
        MoveTo(GRID_X, GRID_Y + 9),
        Print("R reset · q back"),
        ResetColor
    )?;

    Ok(())
}
