//! Tic-tac-toe board representation.
//!
//! A board is nine cells in index order:
//!
//! ```text
//!  0 | 1 | 2
//!  3 | 4 | 5
//!  6 | 7 | 8
//! ```
//!
//! The canonical string form writes the cells in that order using `-` for an
//! empty cell, `o` for the first player and `x` for the second, e.g.
//! `"o---x--xo"`.

use std::fmt;
use std::str::FromStr;

use crate::minimax::game::Player;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The eight winning lines: rows, columns, diagonals.
///
/// Shared by the terminal test and winner extraction; the first matching line
/// in this order decides the winner.
pub const LINES: [[usize; 3]; 8] = [
    [6, 7, 8],
    [3, 4, 5],
    [0, 1, 2],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Mark {
    /// No mark yet.
    #[default]
    Empty,
    /// Placed by the first player.
    First,
    /// Placed by the second player.
    Second,
}

impl Mark {
    /// The mark a player places.
    pub fn of(player: Player) -> Self {
        match player {
            Player::First => Mark::First,
            Player::Second => Mark::Second,
        }
    }

    /// The player owning this mark, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::First => Some(Player::First),
            Mark::Second => Some(Player::Second),
        }
    }

    /// Canonical character for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => '-',
            Mark::First => 'o',
            Mark::Second => 'x',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '-' => Some(Mark::Empty),
            'o' => Some(Mark::First),
            'x' => Some(Mark::Second),
            _ => None,
        }
    }
}

/// Derived classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A player completed a line.
    Won(Player),
    /// Board full with no completed line.
    Draw,
    /// Game still in progress.
    Ongoing,
}

/// Immutable snapshot of all nine cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Board {
    cells: [Mark; CELLS],
}

crate::impl_game_state!(Board);

impl Board {
    /// The empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Mark; CELLS] {
        &self.cells
    }

    /// Mark at a cell index, or `None` past the last cell.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&m| m == Mark::Empty).count()
    }

    /// Number of marks placed by a player.
    pub fn count(&self, player: Player) -> usize {
        let mark = Mark::of(player);
        self.cells.iter().filter(|&&m| m == mark).count()
    }

    /// Indices of empty cells, ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| **m == Mark::Empty)
            .map(|(i, _)| i)
    }

    /// Whether every cell holds a mark.
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Mark::Empty)
    }

    /// The player to move, by parity of empty cells.
    ///
    /// Odd ⇒ first player, even ⇒ second player. This is the only place turn
    /// order is decided; it holds for any board satisfying the mark-count
    /// invariant and ignores whether the game is over.
    pub fn mover(&self) -> Player {
        if self.empty_count() % 2 == 1 {
            Player::First
        } else {
            Player::Second
        }
    }

    /// Winner from the first completed line, if any.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a];
            if mark != Mark::Empty && mark == self.cells[b] && mark == self.cells[c] {
                mark.player()
            } else {
                None
            }
        })
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// Terminal classification of this board.
    pub fn status(&self) -> Status {
        match self.winner() {
            Some(player) => Status::Won(player),
            None if self.is_full() => Status::Draw,
            None => Status::Ongoing,
        }
    }

    /// Copy of this board with `index` set to `player`'s mark.
    ///
    /// Returns `None` if the index is out of range or the cell is occupied.
    pub fn place(&self, index: usize, player: Player) -> Option<Self> {
        if self.cells.get(index) != Some(&Mark::Empty) {
            return None;
        }
        let mut cells = self.cells;
        cells[index] = Mark::of(player);
        Some(Self { cells })
    }

    /// The cell that differs between this board and `next`, if exactly one does.
    pub fn changed_cell(&self, next: &Board) -> Option<usize> {
        let mut diff = (0..CELLS).filter(|&i| self.cells[i] != next.cells[i]);
        match (diff.next(), diff.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }

    /// Check the turn invariant: first player has as many marks as the
    /// second, or exactly one more.
    pub fn check_turn_invariant(&self) -> Result<(), String> {
        let first = self.count(Player::First);
        let second = self.count(Player::Second);
        if first == second || first == second + 1 {
            Ok(())
        } else {
            Err(format!(
                "{} has {} first-player marks and {} second-player marks",
                self, first, second
            ))
        }
    }

    /// Three-row rendering with `|` separators.
    ///
    /// Rows are printed top to bottom as cells 6-8, 3-5, 0-2 so the layout
    /// matches a numeric keypad: position 1 is bottom left, 9 is top right.
    pub fn render(&self) -> String {
        [6, 3, 0]
            .iter()
            .map(|&start| {
                let row: Vec<String> = self.cells[start..start + 3]
                    .iter()
                    .map(|m| m.symbol().to_string())
                    .collect();
                format!("|{}|", row.join("|"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rendering of the position numbers accepted by [`Board::place`] (+1).
    pub fn render_positions() -> String {
        [6, 3, 0]
            .iter()
            .map(|&start| {
                let row: Vec<String> = (start..start + 3).map(|i| (i + 1).to_string()).collect();
                format!("|{}|", row.join("|"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.cells {
            write!(f, "{}", mark.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing a board from its canonical string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    /// String does not have exactly nine characters.
    Length(usize),
    /// Character other than `-`, `o` or `x`.
    Symbol(char),
    /// Mark counts no legal sequence of moves can produce.
    TurnOrder {
        /// Marks placed by the first player.
        first: usize,
        /// Marks placed by the second player.
        second: usize,
    },
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::Length(len) => {
                write!(f, "Board must have {} cells, got {}", CELLS, len)
            }
            BoardParseError::Symbol(c) => {
                write!(f, "Unknown cell symbol '{}', expected '-', 'o' or 'x'", c)
            }
            BoardParseError::TurnOrder { first, second } => write!(
                f,
                "Board has {} 'o' and {} 'x'; 'o' moves first so it needs as many or one more",
                first, second
            ),
        }
    }
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != CELLS {
            return Err(BoardParseError::Length(chars.len()));
        }

        let mut cells = [Mark::Empty; CELLS];
        for (cell, &c) in cells.iter_mut().zip(chars.iter()) {
            *cell = Mark::from_symbol(c).ok_or(BoardParseError::Symbol(c))?;
        }

        let board = Self { cells };
        if board.check_turn_invariant().is_err() {
            return Err(BoardParseError::TurnOrder {
                first: board.count(Player::First),
                second: board.count(Player::Second),
            });
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let b = board("o---x--xo");
        assert_eq!(b.get(0), Some(Mark::First));
        assert_eq!(b.get(4), Some(Mark::Second));
        assert_eq!(b.get(7), Some(Mark::Second));
        assert_eq!(b.get(8), Some(Mark::First));
        assert_eq!(b.get(9), None);
        assert_eq!(b.to_string(), "o---x--xo");

        assert_eq!("o--".parse::<Board>(), Err(BoardParseError::Length(3)));
        assert_eq!("o---z----".parse::<Board>(), Err(BoardParseError::Symbol('z')));
    }

    #[test]
    fn test_parse_rejects_turn_order() {
        assert_eq!(
            "xx-------".parse::<Board>(),
            Err(BoardParseError::TurnOrder { first: 0, second: 2 })
        );
        assert_eq!(
            "oo-------".parse::<Board>(),
            Err(BoardParseError::TurnOrder { first: 2, second: 0 })
        );
        assert_eq!(
            "x--------".parse::<Board>(),
            Err(BoardParseError::TurnOrder { first: 0, second: 1 })
        );
        assert!("ox-------".parse::<Board>().is_ok());
        assert!("oxo------".parse::<Board>().is_ok());
    }

    #[test]
    fn test_mover_by_parity() {
        assert_eq!(Board::new().mover(), Player::First);
        assert_eq!(board("----o----").mover(), Player::Second);
        assert_eq!(board("----o---x").mover(), Player::First);
    }

    #[test]
    fn test_status() {
        assert_eq!(Board::new().status(), Status::Ongoing);
        assert_eq!(board("ooo-xx---").status(), Status::Won(Player::First));
        assert_eq!(board("oo-xxxo--").status(), Status::Won(Player::Second));
        assert_eq!(board("oxooxxxoo").status(), Status::Draw);
        assert!(board("oxooxxxoo").is_terminal());
        assert!(board("ooo-xx---").is_terminal());
        assert!(!board("o---x----").is_terminal());
    }

    #[test]
    fn test_winner_on_full_board() {
        // Full board with a completed diagonal is a win, not a draw.
        let b = board("oxxxoooxo");
        assert!(b.is_full());
        assert_eq!(b.status(), Status::Won(Player::First));
    }

    #[test]
    fn test_place() {
        let b = Board::new().place(4, Player::First).unwrap();
        assert_eq!(b.to_string(), "----o----");
        assert!(b.place(4, Player::Second).is_none());
        assert!(b.place(9, Player::Second).is_none());
        assert_eq!(Board::new().changed_cell(&b), Some(4));
        assert_eq!(Board::new().changed_cell(&Board::new()), None);
    }

    #[test]
    fn test_turn_invariant() {
        assert!(Board::new().check_turn_invariant().is_ok());
        assert!(board("o--------").check_turn_invariant().is_ok());
        assert!(board("ox-------").check_turn_invariant().is_ok());

        // Boards built cell by cell skip the parse-time check.
        let two_first = Board::new()
            .place(0, Player::First)
            .and_then(|b| b.place(1, Player::First))
            .unwrap();
        assert!(two_first.check_turn_invariant().is_err());
        let second_only = Board::new().place(0, Player::Second).unwrap();
        assert!(second_only.check_turn_invariant().is_err());
    }

    #[test]
    fn test_render_numpad_layout() {
        let b = board("o-------x");
        assert_eq!(b.render(), "|-|-|x|\n|-|-|-|\n|o|-|-|");
        assert_eq!(Board::render_positions(), "|7|8|9|\n|4|5|6|\n|1|2|3|");
    }
}
