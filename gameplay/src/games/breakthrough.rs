use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{GameResult, GameState, GameStatus};

pub const ROWS: usize = 6;
pub const COLS: usize = 6;

pub const WHITE: usize = 0;
pub const BLACK: usize = 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Square `{0}` is off the board.")]
    OffBoard(Square),
    #[error("Square `{0}` does not hold a piece of the player to move.")]
    NotYourPiece(Square),
    #[error("Cannot move from `{0}` to `{1}`.")]
    IllegalMove(Square, Square),
    #[error("The game is over.")]
    GameOver,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Cannot parse `{0}`, expected something like `b5b4`.")]
pub struct ParseError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
    #[serde(rename = "_")]
    Empty,
}

impl Cell {
    pub fn player(self) -> Option<usize> {
        match self {
            Cell::White => Some(WHITE),
            Cell::Black => Some(BLACK),
            Cell::Empty => None,
        }
    }

    fn of(player: usize) -> Cell {
        if player == WHITE {
            Cell::White
        } else {
            Cell::Black
        }
    }

    fn swapped(self) -> Cell {
        match self {
            Cell::White => Cell::Black,
            Cell::Black => Cell::White,
            Cell::Empty => Cell::Empty,
        }
    }
}

/// Row 0 is the top of the board. Black starts on rows 0 and 1, White on the
/// last two rows.
pub type Board = [[Cell; COLS]; ROWS];

pub fn initial_board() -> Board {
    let mut board = [[Cell::Empty; COLS]; ROWS];
    for col in 0..COLS {
        board[0][col] = Cell::Black;
        board[1][col] = Cell::Black;
        board[ROWS - 2][col] = Cell::White;
        board[ROWS - 1][col] = Cell::White;
    }
    board
}

/// Flip the board upside down and swap the colours, so the player who was
/// White sees the position as Black would.
pub fn invert(board: &Board) -> Board {
    let mut inverted = [[Cell::Empty; COLS]; ROWS];
    for row in 0..ROWS {
        for col in 0..COLS {
            inverted[row][col] = board[ROWS - row - 1][col].swapped();
        }
    }
    inverted
}

/// A `(row, col)` pair. Serializes as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square(pub usize, pub usize);

impl Square {
    pub fn row(self) -> usize {
        self.0
    }

    pub fn col(self) -> usize {
        self.1
    }

    pub fn on_board(self) -> bool {
        self.0 < ROWS && self.1 < COLS
    }

    /// The same square seen from an inverted board. Off-board squares stay
    /// off the board.
    pub fn mirror(self) -> Square {
        match (ROWS - 1).checked_sub(self.0) {
            Some(row) => Square(row, self.1),
            None => self,
        }
    }

    fn offset(self, rows: isize, cols: isize) -> Option<Square> {
        let row = self.0.checked_add_signed(rows)?;
        let col = self.1.checked_add_signed(cols)?;
        let square = Square(row, col);
        square.on_board().then_some(square)
    }
}

// Columns are letters from the left, rows are numbered from the bottom.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.on_board() {
            write!(f, "{}{}", (b'a' + self.1 as u8) as char, ROWS - self.0)
        } else {
            write!(f, "[{}, {}]", self.0, self.1)
        }
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError(s.to_owned());
        let mut chars = s.chars();
        let (Some(c), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let col = (c.to_ascii_lowercase() as usize)
            .checked_sub('a' as usize)
            .filter(|col| *col < COLS)
            .ok_or_else(err)?;
        let rank = r.to_digit(10).map(|d| d as usize).ok_or_else(err)?;
        if rank == 0 || rank > ROWS {
            return Err(err());
        }
        Ok(Square(ROWS - rank, col))
    }
}

/// Move a piece from the first square to the second. Serializes as
/// `[[row, col], [row, col]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action(pub Square, pub Square);

impl Action {
    pub fn mirror(self) -> Action {
        Action(self.0.mirror(), self.1.mirror())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || s.len() != 4 {
            return Err(ParseError(s.to_owned()));
        }
        let src = s[..2].parse::<Square>().map_err(|_| ParseError(s.to_owned()))?;
        let dst = s[2..].parse::<Square>().map_err(|_| ParseError(s.to_owned()))?;
        Ok(Action(src, dst))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakthrough {
    board: Board,
    next_player: usize,
}

impl Breakthrough {
    pub fn new(board: Board, next_player: usize) -> Self {
        Self {
            board,
            next_player: next_player % 2,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn get(&self, square: Square) -> Option<Cell> {
        square
            .on_board()
            .then(|| self.board[square.row()][square.col()])
    }

    fn set(&mut self, square: Square, cell: Cell) {
        self.board[square.row()][square.col()] = cell;
    }

    fn forward(player: usize) -> isize {
        if player == WHITE {
            -1
        } else {
            1
        }
    }

    fn check_action(&self, action: &Action) -> Result<(), Error> {
        if let GameStatus::Over { .. } = self._status() {
            return Err(Error::GameOver);
        }
        self.check_move(action)
    }

    fn check_move(&self, action: &Action) -> Result<(), Error> {
        let Action(src, dst) = *action;
        let mover = Cell::of(self.next_player);
        match self.get(src) {
            None => return Err(Error::OffBoard(src)),
            Some(cell) if cell != mover => return Err(Error::NotYourPiece(src)),
            Some(_) => {}
        }
        let Some(target) = self.get(dst) else {
            return Err(Error::OffBoard(dst));
        };

        let rows = dst.row() as isize - src.row() as isize;
        let cols = dst.col() as isize - src.col() as isize;
        if rows != Self::forward(self.next_player) || cols.abs() > 1 {
            return Err(Error::IllegalMove(src, dst));
        }
        // Straight moves never capture, diagonal moves may.
        if target == mover || (cols == 0 && target != Cell::Empty) {
            return Err(Error::IllegalMove(src, dst));
        }
        Ok(())
    }

    fn _status(&self) -> GameStatus {
        let mut white = 0;
        let mut black = 0;
        for (row, cells) in self.board.iter().enumerate() {
            for cell in cells {
                match cell {
                    Cell::White => {
                        white += 1;
                        if row == 0 {
                            return winner(WHITE);
                        }
                    }
                    Cell::Black => {
                        black += 1;
                        if row == ROWS - 1 {
                            return winner(BLACK);
                        }
                    }
                    Cell::Empty => {}
                }
            }
        }

        if white == 0 {
            return winner(BLACK);
        }
        if black == 0 {
            return winner(WHITE);
        }
        GameStatus::InProgress {
            next_player: self.next_player,
        }
    }

    fn _legal_actions(&self) -> Vec<Action> {
        if let GameStatus::Over { .. } = self._status() {
            return vec![];
        }
        let mover = Cell::of(self.next_player);
        let forward = Self::forward(self.next_player);

        let mut actions = vec![];
        for row in 0..ROWS {
            for col in 0..COLS {
                let src = Square(row, col);
                if self.board[row][col] != mover {
                    continue;
                }
                for cols in -1..=1 {
                    if let Some(dst) = src.offset(forward, cols) {
                        let action = Action(src, dst);
                        if self.check_move(&action).is_ok() {
                            actions.push(action);
                        }
                    }
                }
            }
        }
        actions
    }

    fn _apply_action(&mut self, action: &Action) -> Result<GameStatus, Error> {
        self.check_action(action)?;
        let Action(src, dst) = *action;
        self.set(dst, Cell::of(self.next_player));
        self.set(src, Cell::Empty);
        self.next_player = (self.next_player + 1) % 2;
        Ok(self._status())
    }
}

fn winner(player: usize) -> GameStatus {
    GameStatus::Over {
        result: GameResult::Winner {
            winning_player: player,
        },
    }
}

impl Default for Breakthrough {
    fn default() -> Self {
        Self {
            board: initial_board(),
            next_player: WHITE,
        }
    }
}

impl GameState for Breakthrough {
    type Error = Error;
    type Action = Action;

    fn valid_action(&self, action: &Self::Action) -> bool {
        self.check_action(action).is_ok()
    }
    fn legal_actions(&self) -> Vec<Self::Action> {
        self._legal_actions()
    }
    fn status(&self) -> GameStatus {
        self._status()
    }
    fn apply_action(&mut self, action: &Self::Action) -> Result<GameStatus, Self::Error> {
        self._apply_action(action)
    }
}
