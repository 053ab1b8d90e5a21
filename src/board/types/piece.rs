//! Piece kinds, colors and the packed cell encoding.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const KING_BIT: u8 = 1 << 0;
const QUEEN_BIT: u8 = 1 << 1;
const BISHOP_BIT: u8 = 1 << 2;
const KNIGHT_BIT: u8 = 1 << 3;
const ROOK_BIT: u8 = 1 << 4;
const PAWN_BIT: u8 = 1 << 5;
const WHITE_BIT: u8 = 1 << 6;
const BLACK_BIT: u8 = 1 << 7;

const KIND_MASK: u8 = KING_BIT | QUEEN_BIT | BISHOP_BIT | KNIGHT_BIT | ROOK_BIT | PAWN_BIT;
const COLOR_MASK: u8 = WHITE_BIT | BLACK_BIT;

/// Chess piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceKind {
    /// All kinds in bit order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Pawn,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Bishop => 2,
            PieceKind::Knight => 3,
            PieceKind::Rook => 4,
            PieceKind::Pawn => 5,
        }
    }

    #[inline]
    #[must_use]
    const fn bit(self) -> u8 {
        match self {
            PieceKind::King => KING_BIT,
            PieceKind::Queen => QUEEN_BIT,
            PieceKind::Bishop => BISHOP_BIT,
            PieceKind::Knight => KNIGHT_BIT,
            PieceKind::Rook => ROOK_BIT,
            PieceKind::Pawn => PAWN_BIT,
        }
    }

    /// Parse a kind from a notation letter of either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'r' => Some(PieceKind::Rook),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Lowercase notation letter.
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Rook => 'r',
            PieceKind::Pawn => 'p',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Rook => "rook",
            PieceKind::Pawn => "pawn",
        };
        f.write_str(name)
    }
}

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Scoring sign for evaluation (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Pawn forward direction (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Pawn starting rank (1 for White, 6 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_start_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Color::White => WHITE_BIT,
            Color::Black => BLACK_BIT,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Packed contents of one grid cell: a kind bit plus a color bit, or zero for an
/// empty square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece(u8);

impl Piece {
    pub const EMPTY: Piece = Piece(0);

    #[inline]
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece(kind.bit() | color.bit())
    }

    /// Decode a raw cell value, rejecting anything that is not empty or exactly
    /// one kind bit with exactly one color bit.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits == 0 {
            return Some(Piece::EMPTY);
        }
        let kind = bits & KIND_MASK;
        let color = bits & COLOR_MASK;
        if bits & !(KIND_MASK | COLOR_MASK) != 0
            || kind.count_ones() != 1
            || color.count_ones() != 1
        {
            return None;
        }
        Some(Piece(bits))
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self.0 & KIND_MASK {
            KING_BIT => Some(PieceKind::King),
            QUEEN_BIT => Some(PieceKind::Queen),
            BISHOP_BIT => Some(PieceKind::Bishop),
            KNIGHT_BIT => Some(PieceKind::Knight),
            ROOK_BIT => Some(PieceKind::Rook),
            PAWN_BIT => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self.0 & COLOR_MASK {
            WHITE_BIT => Some(Color::White),
            BLACK_BIT => Some(Color::Black),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is(self, kind: PieceKind, color: Color) -> bool {
        self.0 == kind.bit() | color.bit()
    }

    #[inline]
    #[must_use]
    pub fn is_color(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    /// Same piece with the other color.
    #[must_use]
    pub fn swap_color(self) -> Self {
        match (self.kind(), self.color()) {
            (Some(kind), Some(color)) => Piece::new(kind, color.opponent()),
            _ => self,
        }
    }

    /// Notation letter, uppercase for White.
    #[must_use]
    pub fn to_fen_char(self) -> Option<char> {
        let kind = self.kind()?;
        let c = kind.to_char();
        match self.color()? {
            Color::White => Some(c.to_ascii_uppercase()),
            Color::Black => Some(c),
        }
    }

    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_fen_char() {
            Some(c) => write!(f, "Piece({c})"),
            None => write!(f, "Piece(-)"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.color(), self.kind()) {
            (Some(color), Some(kind)) => write!(f, "{color} {kind}"),
            _ => write!(f, "empty"),
        }
    }
}
