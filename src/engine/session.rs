use std::sync::Arc;

use crate::board::{
    iterative_search, search, Board, ChessError, CheckStatus, Color, EvalOptions, Evaluator,
    GameEnd, Move, MoveResult, Piece, Position, SearchLimits, SearchOptions, SearchResult,
};
use crate::cache::QueryCache;
use crate::sync::StopFlag;

use super::EngineConfig;

/// Called after a commit or undo with the new side to move.
pub type TurnObserver = Box<dyn FnMut(Color) + Send>;
/// Called just before a move is committed or undone.
pub type StateObserver = Box<dyn FnMut() + Send>;
/// Called when a commit leaves the side to move without a legal move.
pub type GameOverObserver = Box<dyn FnMut(&GameEnd) + Send>;
/// Called after every search with the root side's best score, 0 when there is
/// no move.
pub type ScoreObserver = Box<dyn FnMut(i32) + Send>;

/// One game: the board, the cache its queries go through, and the callbacks
/// registered by the caller.
pub struct GameSession {
    board: Board,
    cache: Arc<QueryCache>,
    config: EngineConfig,
    stop: StopFlag,
    /// Pieces each color has taken, indexed by the capturing color.
    captured: [Vec<Piece>; 2],
    /// Capture of every committed move, for undo.
    capture_log: Vec<Option<Piece>>,
    game_over: Option<GameEnd>,
    turn_observers: Vec<TurnObserver>,
    state_observers: Vec<StateObserver>,
    game_over_observers: Vec<GameOverObserver>,
    score_observers: Vec<ScoreObserver>,
}

impl GameSession {
    /// A session on the starting position with its own cache.
    pub fn new(config: EngineConfig) -> Self {
        let cache = Arc::new(QueryCache::new(config.cache_capacity));
        Self::with_board(Board::new(), config, cache)
    }

    pub fn from_fen(fen: &str, config: EngineConfig) -> Result<Self, ChessError> {
        let cache = Arc::new(QueryCache::new(config.cache_capacity));
        Ok(Self::with_board(Board::try_from_fen(fen)?, config, cache))
    }

    /// A session on `board` sharing `cache` with whoever else holds it.
    pub fn with_board(board: Board, config: EngineConfig, cache: Arc<QueryCache>) -> Self {
        GameSession {
            board,
            cache,
            config,
            stop: StopFlag::new(),
            captured: [Vec::new(), Vec::new()],
            capture_log: Vec::new(),
            game_over: None,
            turn_observers: Vec::new(),
            state_observers: Vec::new(),
            game_over_observers: Vec::new(),
            score_observers: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Handle that cancels a running search when raised.
    pub fn stop_handle(&self) -> StopFlag {
        self.stop.clone()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Pieces `color` has captured so far, in capture order.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    pub fn game_over(&self) -> Option<GameEnd> {
        self.game_over
    }

    pub fn on_turn_changed<F>(&mut self, callback: F)
    where
        F: FnMut(Color) + Send + 'static,
    {
        self.turn_observers.push(Box::new(callback));
    }

    pub fn on_state_changed<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.state_observers.push(Box::new(callback));
    }

    pub fn on_game_over<F>(&mut self, callback: F)
    where
        F: FnMut(&GameEnd) + Send + 'static,
    {
        self.game_over_observers.push(Box::new(callback));
    }

    pub fn on_score_updated<F>(&mut self, callback: F)
    where
        F: FnMut(i32) + Send + 'static,
    {
        self.score_observers.push(Box::new(callback));
    }

    fn notify_state_changed(&mut self) {
        for observer in &mut self.state_observers {
            observer();
        }
    }

    fn notify_turn_changed(&mut self) {
        let side = self.board.side_to_move();
        for observer in &mut self.turn_observers {
            observer(side);
        }
    }

    pub fn is_legal_move(&mut self, from: Position, to: Position) -> Result<bool, ChessError> {
        self.board.is_legal_move(from, to, Some(&*self.cache))
    }

    pub fn legal_moves_for(&mut self, color: Color) -> Result<Vec<Move>, ChessError> {
        self.board.legal_moves_for(color, Some(&*self.cache))
    }

    pub fn legal_destinations(&mut self, from: Position) -> Result<Vec<Position>, ChessError> {
        self.board.legal_destinations(from, Some(&*self.cache))
    }

    pub fn check_status(&mut self) -> Result<CheckStatus, ChessError> {
        self.board.check_status(Some(&*self.cache))
    }

    /// Validate and commit `from -> to` for the side to move.
    ///
    /// Game end is checked after the commit; if that check fails the move
    /// stays committed, a warning is logged and no game-over is reported.
    pub fn commit_move(&mut self, from: Position, to: Position) -> Result<MoveResult, ChessError> {
        if !self.is_legal_move(from, to)? {
            return Err(ChessError::IllegalMove {
                mv: Move::new(from, to),
            });
        }

        self.notify_state_changed();
        let mover = self.board.side_to_move();
        let result = self.board.apply_move(from, to)?;
        log::info!("{mover} plays {}", Move::new(from, to));

        if let Some(piece) = result.captured {
            self.captured[mover.index()].push(piece);
        }
        self.capture_log.push(result.captured);
        self.notify_turn_changed();

        let status = match self.check_status() {
            Ok(status) => status,
            Err(err) => {
                log::warn!("game end check failed after {mover} moved: {err}");
                return Ok(result);
            }
        };
        if let Some(end) = status.end {
            log::info!("{:?}: {} has no legal move", end.outcome, end.side);
            self.game_over = Some(end);
            for observer in &mut self.game_over_observers {
                observer(&end);
            }
        }
        Ok(result)
    }

    /// Take back the last committed move.
    pub fn undo(&mut self) -> Result<(), ChessError> {
        if self.board.history_len() == 0 {
            return Err(ChessError::EmptyHistory);
        }
        self.notify_state_changed();
        self.board.undo()?;
        if let Some(Some(piece)) = self.capture_log.pop() {
            let capturer = self.board.side_to_move();
            self.captured[capturer.index()].pop();
            log::debug!("{capturer} gives back {piece}");
        }
        self.game_over = None;
        self.notify_turn_changed();
        Ok(())
    }

    /// Static score of the current position from White's point of view.
    pub fn evaluate(&self, options: EvalOptions) -> Result<i32, ChessError> {
        Evaluator::new(options).evaluate(self.board.state(), Some(&*self.cache))
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions::new(self.config.eval)
            .with_tie_break(self.config.tie_break)
            .with_cache(Arc::clone(&self.cache))
            .with_limits(SearchLimits {
                max_nodes: self.config.max_nodes,
                stop: Some(self.stop.clone()),
            })
    }

    /// Search the current position with the session's configuration.
    pub fn search(&mut self) -> Result<SearchResult, ChessError> {
        let options = self.search_options();
        self.search_with(&options)
    }

    pub fn search_with(&mut self, options: &SearchOptions) -> Result<SearchResult, ChessError> {
        self.stop.reset();
        let depth = self.config.depth;
        let result = if self.config.iterative {
            iterative_search(&mut self.board, depth, options)?
        } else {
            search(&mut self.board, depth, options)?
        };

        let score = result.best_score.unwrap_or(0);
        for observer in &mut self.score_observers {
            observer(score);
        }
        Ok(result)
    }

    /// Search and commit the best move. Returns `None` when the side to move
    /// has no legal move.
    pub fn play_best_move(&mut self) -> Result<Option<MoveResult>, ChessError> {
        let result = self.search()?;
        match result.best_move {
            Some(mv) => self.commit_move(mv.from, mv.to).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("fen", &self.board.to_fen())
            .field("config", &self.config)
            .field("captured", &self.captured)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}
