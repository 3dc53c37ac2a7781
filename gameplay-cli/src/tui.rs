use std::io;
use std::io::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue, style,
    terminal::{self, ClearType},
};

use gameplay::games::breakthrough::{Breakthrough, Cell, Square, BLACK, COLS, ROWS, WHITE};
use gameplay::games::{GameResult, GameState, GameStatus};

pub fn read_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers: _,
            state: _,
        }) = event::read()?
        {
            return Ok(code);
        }
    }
}

pub fn read_char() -> io::Result<char> {
    loop {
        if let KeyCode::Char(c) = read_key()? {
            return Ok(c);
        }
    }
}

pub fn show_error(err: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(
        stdout,
        style::ResetColor,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0),
        style::Print("Breakthrough")
    )?;

    queue!(stdout, cursor::MoveToNextLine(1))?;

    queue!(
        stdout,
        style::SetForegroundColor(style::Color::Red),
        style::Print("Error: "),
        style::Print(err),
        style::ResetColor,
        cursor::MoveToNextLine(1),
        style::Print("hit 'q' to quit"),
        cursor::MoveToNextLine(1),
    )?;

    stdout.flush()
}

const BORDER: &str = "  +---+---+---+---+---+---+";

fn player_name(player: usize) -> (style::Color, &'static str) {
    match player {
        WHITE => (style::Color::Blue, "White"),
        BLACK => (style::Color::Red, "Black"),
        _ => unreachable!("Invalid player"),
    }
}

/// Draw the board. `input` is the partially typed move when a human is on
/// turn, `None` while waiting on an agent. `flipped` puts Black at the bottom.
pub fn show_breakthrough(
    state: &Breakthrough,
    input: Option<&str>,
    flipped: bool,
) -> io::Result<()> {
    let mut stdout = io::stdout();

    // Header
    queue!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    match state.status() {
        GameStatus::InProgress { next_player } => {
            let (color, name) = player_name(next_player);
            queue!(
                stdout,
                style::SetForegroundColor(color),
                style::Print(name),
                style::ResetColor,
                style::Print("'s turn"),
            )?;
            if input.is_some() {
                queue!(stdout, style::Print(" (that's you)"))?;
            }
            queue!(stdout, cursor::MoveToNextLine(1))?;
        }
        GameStatus::Over { result } => match result {
            GameResult::Winner { winning_player } => {
                let (color, name) = player_name(winning_player);
                queue!(
                    stdout,
                    style::SetForegroundColor(color),
                    style::Print(name),
                    style::ResetColor,
                    style::Print(" wins!"),
                    cursor::MoveToNextLine(1)
                )?;
            }
            GameResult::Tie => {
                queue!(
                    stdout,
                    style::Print("It's a Tie"),
                    cursor::MoveToNextLine(1)
                )?;
            }
        },
    }

    queue!(stdout, style::Print(BORDER), cursor::MoveToNextLine(1))?;
    for line in 0..ROWS {
        let row = if flipped { ROWS - line - 1 } else { line };
        queue!(stdout, style::Print(format!("{} ", ROWS - row)))?;
        for col in 0..COLS {
            queue!(stdout, style::Print("| "))?;
            match state.get(Square(row, col)) {
                Some(Cell::White) => {
                    queue!(
                        stdout,
                        style::SetForegroundColor(style::Color::Blue),
                        style::Print("●"),
                        style::ResetColor
                    )?;
                }
                Some(Cell::Black) => {
                    queue!(
                        stdout,
                        style::SetForegroundColor(style::Color::Red),
                        style::Print("●"),
                        style::ResetColor
                    )?;
                }
                Some(Cell::Empty) | None => {
                    queue!(stdout, style::Print(" "))?;
                }
            };
            queue!(stdout, style::Print(" "))?;
        }
        queue!(
            stdout,
            style::Print("|"),
            cursor::MoveToNextLine(1),
            style::Print(BORDER),
            cursor::MoveToNextLine(1)
        )?;
    }
    queue!(stdout, style::Print("   "))?;
    for col in 0..COLS {
        queue!(stdout, style::Print(format!(" {}  ", (b'a' + col as u8) as char)))?;
    }
    queue!(stdout, cursor::MoveToNextLine(1))?;

    if let Some(input) = input {
        queue!(
            stdout,
            style::Print(format!("type a move like 'b2b3': {}", input)),
            cursor::MoveToNextLine(1),
            style::Print("or "),
        )?;
    }

    // Keys are only read on a human turn or once the game is over.
    let reading_keys = input.is_some() || matches!(state.status(), GameStatus::Over { .. });
    if reading_keys {
        queue!(
            stdout,
            style::Print("hit 'i' to flip the board, 'r' to start over or 'q' to quit"),
        )?;
    }
    queue!(stdout, cursor::MoveToNextLine(1), style::ResetColor)?;

    stdout.flush()
}

pub fn setup() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    terminal::enable_raw_mode()
}

pub fn cleanup() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}
