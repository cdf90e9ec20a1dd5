use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::types::{Cell, Player, Position, Scores};
use crate::{BOARD_SIZE, NUM_SQUARES};

/// Ray directions as (row, col) steps: NW, N, NE, W, E, SW, S, SE.
/// Flip lists follow this order, then distance from the placed disc.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// For every square, the squares walked outward in each of `DIRECTIONS`.
static RAYS: Lazy<Vec<[Vec<usize>; 8]>> = Lazy::new(|| (0..NUM_SQUARES).map(rays_from).collect());

/// Othello board state represented by two bitboards (bit `row * 8 + col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw occupancy masks. A square set in both masks is
    /// treated as black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Sandwich-rule legality. Off-board coordinates are simply illegal.
    pub fn is_legal_move(&self, row: u8, col: u8, player: Player) -> bool {
        match Position::new(row, col) {
            Ok(pos) => self.flip_mask(pos, player) != 0,
            Err(_) => false,
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_mask(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Legal moves for `player` in row-major scan order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        mask_to_positions(self.legal_mask(player))
    }

    pub fn has_any_legal_move(&self, player: Player) -> bool {
        self.legal_mask(player) != 0
    }

    /// Discs `player` would flip by playing at `pos`, in direction-then-distance
    /// order. Empty when the move is illegal. Does not modify the board.
    pub fn flips(&self, pos: Position, player: Player) -> Vec<Position> {
        let (me, opp) = self.sides(player);
        let mut out = Vec::new();
        if ((me | opp) & bit(pos.index())) == 0 {
            for_each_flip(pos.index(), me, opp, |sq| out.push(Position::from_index(sq)));
        }
        out
    }

    /// Number of discs `player` would flip by playing at `pos`.
    pub fn flip_count(&self, pos: Position, player: Player) -> u32 {
        self.flip_mask(pos, player).count_ones()
    }

    /// Places one disc and flips captured discs.
    /// Returns the flipped squares. Returns an empty list and leaves the board
    /// untouched when the move is illegal.
    pub fn place(&mut self, pos: Position, player: Player) -> Vec<Position> {
        let flipped = self.flips(pos, player);
        if flipped.is_empty() {
            return flipped;
        }

        let flips = flipped.iter().fold(0u64, |acc, p| acc | bit(p.index()));
        let (me, opp) = self.sides(player);
        let next_me = me | bit(pos.index()) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flipped
    }

    /// Disc counts from a full scan of both bitboards.
    pub fn count(&self) -> Scores {
        Scores {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.count().empty()
    }

    pub fn is_full(&self) -> bool {
        (self.black | self.white) == u64::MAX
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(Position::from_index(pos)).code();
        }
        board
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn flip_mask(&self, pos: Position, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        collect_flips(pos.index(), me, opp)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Pretty grid with column letters and 1-based row numbers.
/// `B` marks black, `W` white and `.` empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  A B C D E F G H")?;
        for row in 0..BOARD_SIZE {
            write!(f, "\n{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                let symbol = match self.cell(Position::from_index(row * BOARD_SIZE + col)) {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{symbol} ")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid board string: {0}")]
pub struct ParseBoardError(String);

/// Parses 64 row-major cells written as `B`/`X` (black), `W`/`O` (white) or
/// `.`/`-` (empty). Whitespace is ignored so rows can sit on separate lines.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut black = 0u64;
        let mut white = 0u64;
        let mut pos = 0usize;

        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            if pos >= NUM_SQUARES {
                return Err(ParseBoardError("more than 64 cells".to_string()));
            }
            match ch.to_ascii_uppercase() {
                'B' | 'X' => black |= bit(pos),
                'W' | 'O' => white |= bit(pos),
                '.' | '-' => {}
                other => return Err(ParseBoardError(format!("unexpected cell {other:?}"))),
            }
            pos += 1;
        }

        if pos != NUM_SQUARES {
            return Err(ParseBoardError(format!("expected 64 cells, got {pos}")));
        }
        Ok(Self { black, white })
    }
}

/// Union of all sandwiched runs for a disc placed at `pos`.
fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    if pos >= NUM_SQUARES || ((me | opp) & bit(pos)) != 0 {
        return 0;
    }

    let mut flips = 0u64;
    for_each_flip(pos, me, opp, |sq| flips |= bit(sq));
    flips
}

/// Visits every square flipped by a disc at `pos`, ray by ray.
fn for_each_flip(pos: usize, me: u64, opp: u64, mut visit: impl FnMut(usize)) {
    for ray in &RAYS[pos] {
        let run = ray.iter().take_while(|&&sq| (opp & bit(sq)) != 0).count();
        if run == 0 {
            continue;
        }
        // The run only counts when it ends on one of our own discs.
        if let Some(&end) = ray.get(run)
            && (me & bit(end)) != 0
        {
            ray[..run].iter().copied().for_each(&mut visit);
        }
    }
}

fn rays_from(pos: usize) -> [Vec<usize>; 8] {
    let (row, col) = pos_to_row_col(pos);
    DIRECTIONS.map(|(dr, dc)| {
        let mut ray = Vec::new();
        let mut r = row + dr;
        let mut c = col + dc;
        while in_bounds(r, c) {
            ray.push((r as usize) * BOARD_SIZE + c as usize);
            r += dr;
            c += dc;
        }
        ray
    })
}

fn mask_to_positions(mut mask: u64) -> Vec<Position> {
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        out.push(Position::from_index(mask.trailing_zeros() as usize));
        mask &= mask - 1;
    }
    out
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
