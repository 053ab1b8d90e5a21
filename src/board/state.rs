use super::error::{ChessError, PositionError};
use super::history::History;
use super::{CastlingRights, Color, Piece, PieceKind, Position};
use crate::zobrist::{castling_key, piece_key, side_key};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One complete position: the 8x8 grid plus side to move, castling rights and
/// both clocks.
///
/// The signature is a Zobrist hash of grid, side to move and castling rights,
/// kept in step by every mutator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub(crate) grid: [[Piece; 8]; 8], // grid[y][x]
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) signature: u64,
}

impl BoardState {
    /// Standard starting position.
    pub fn new() -> Self {
        let mut state = BoardState::empty();
        for (x, kind) in BACK_RANK.iter().enumerate() {
            let x = x as i8;
            state.set(Position::new(x, 0), Piece::new(*kind, Color::White));
            state.set(Position::new(x, 7), Piece::new(*kind, Color::Black));
            state.set(Position::new(x, 1), Piece::new(PieceKind::Pawn, Color::White));
            state.set(Position::new(x, 6), Piece::new(PieceKind::Pawn, Color::Black));
        }
        state.set_castling_rights(CastlingRights::all());
        state
    }

    /// No pieces, White to move, no castling rights, full-move number 1.
    pub fn empty() -> Self {
        BoardState {
            grid: [[Piece::EMPTY; 8]; 8],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            halfmove_clock: 0,
            fullmove_number: 1,
            signature: 0,
        }
    }

    /// Contents of `pos`; off-board positions read as empty.
    #[inline]
    pub fn get(&self, pos: Position) -> Piece {
        if pos.is_on_board() {
            self.grid[pos.y as usize][pos.x as usize]
        } else {
            Piece::EMPTY
        }
    }

    pub fn put(&mut self, pos: Position, piece: Piece) -> Result<(), ChessError> {
        if !pos.is_on_board() {
            return Err(PositionError::OutOfRange { x: pos.x, y: pos.y }.into());
        }
        self.set(pos, piece);
        Ok(())
    }

    pub fn clear(&mut self, pos: Position) -> Result<(), ChessError> {
        self.put(pos, Piece::EMPTY)
    }

    /// Unchecked write for positions already known to be on the board.
    #[inline]
    pub(crate) fn set(&mut self, pos: Position, piece: Piece) {
        let cell = &mut self.grid[pos.y as usize][pos.x as usize];
        self.signature ^= piece_key(*cell, pos) ^ piece_key(piece, pos);
        *cell = piece;
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, side: Color) {
        self.signature ^= side_key(self.side_to_move) ^ side_key(side);
        self.side_to_move = side;
    }

    pub fn toggle_turn(&mut self) {
        self.set_side_to_move(self.side_to_move.opponent());
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.signature ^= castling_key(self.castling) ^ castling_key(rights);
        self.castling = rights;
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    pub fn increment_fullmove_number(&mut self) {
        self.fullmove_number = self.fullmove_number.saturating_add(1);
    }

    /// Zobrist signature of grid, side to move and castling rights.
    #[inline]
    pub fn signature(&self) -> u64 {
        self.signature
    }

    /// Signature recomputed from scratch; always equals [`Self::signature`].
    pub fn calculate_signature(&self) -> u64 {
        let mut hash = side_key(self.side_to_move) ^ castling_key(self.castling);
        for (pos, piece) in self.pieces() {
            hash ^= piece_key(piece, pos);
        }
        hash
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all()
            .map(move |pos| (pos, self.get(pos)))
            .filter(|(_, piece)| !piece.is_empty())
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.is_color(color))
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.is(kind, color))
            .count()
    }

    pub fn find_king(&self, color: Color) -> Result<Position, ChessError> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceKind::King, color))
            .map(|(pos, _)| pos)
            .ok_or(ChessError::KingNotFound { color })
    }

    /// The same position seen from the other side: colors swapped, ranks
    /// flipped, castling rights exchanged.
    pub fn mirrored(&self) -> Self {
        let mut out = BoardState::empty();
        for (pos, piece) in self.pieces() {
            out.set(pos.flip_vertical(), piece.swap_color());
        }
        out.set_side_to_move(self.side_to_move.opponent());
        out.set_castling_rights(self.castling.swap_colors());
        out.set_clocks(self.halfmove_clock, self.fullmove_number);
        out
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::new()
    }
}

/// A position together with the snapshots needed to undo committed moves.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) state: BoardState,
    pub(crate) history: History,
}

impl Board {
    pub fn new() -> Self {
        Board::from_state(BoardState::new())
    }

    pub fn from_state(state: BoardState) -> Self {
        Board {
            state,
            history: History::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn into_state(self) -> BoardState {
        self.state
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Piece {
        self.state.get(pos)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn signature(&self) -> u64 {
        self.state.signature
    }

    /// Number of moves that can be undone.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// A fresh board on the same position with an empty history.
    pub fn detached(&self) -> Board {
        Board::from_state(self.state.clone())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl From<BoardState> for Board {
    fn from(state: BoardState) -> Self {
        Board::from_state(state)
    }
}
