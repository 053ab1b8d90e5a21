//! Game session: one board, a shared query cache and observer callbacks.
//!
//! The session is the surface a presentation layer talks to. It validates and
//! commits moves, keeps the captured pieces, and tells its observers when the
//! state is about to change, whose turn it is, and when the game is over.

mod config;
mod session;

pub use config::EngineConfig;
pub use session::{
    GameOverObserver, GameSession, ScoreObserver, StateObserver, TurnObserver,
};
