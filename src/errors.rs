use thiserror::Error;

/// Main error type for the Creature Arena core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Invalid data supplied when building a domain object
    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),
    /// Invalid roster operation
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    /// Action not allowed by the current battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Malformed player action
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Failure reading or writing saved state
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Errors raised while constructing moves, creatures or type charts.
/// These are never clamped away: invalid data fails at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("accuracy must be between 0 and 100, got {0}")]
    InvalidAccuracy(u8),
    #[error("level must be at least 1")]
    InvalidLevel,
    #[error("{stat} must be positive for {name}")]
    InvalidStat { name: String, stat: &'static str },
    #[error("{name} must have one or two types, got {count}")]
    InvalidTypeCount { name: String, count: usize },
    #[error("{name} can know at most 4 moves, got {count}")]
    TooManyMoves { name: String, count: usize },
    #[error("type chart multiplier for {attacking} vs {defending} must be 0, 0.5, 1 or 2, got {value}")]
    InvalidMultiplier {
        attacking: String,
        defending: String,
        value: f64,
    },
    #[error("malformed data: {0}")]
    MalformedData(String),
}

/// Errors related to roster bookkeeping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster index {index} out of range (roster has {len} entries)")]
    InvalidIndex { index: usize, len: usize },
    #[error("got {copies} battle copies for {indices} roster indices")]
    MismatchedSync { copies: usize, indices: usize },
    #[error("creature {0} is locked")]
    Locked(String),
    #[error("no creatures selected for the team")]
    EmptyTeam,
    #[error("roster index {0} is listed more than once")]
    DuplicateIndex(usize),
}

/// Errors related to battle state validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    #[error("a team must contain at least one creature able to battle")]
    EmptyTeam,
    #[error("{action} is not allowed during {phase}")]
    NotAllowedInPhase {
        action: &'static str,
        phase: &'static str,
    },
    #[error("the battle is already finished")]
    BattleFinished,
}

/// Errors related to player actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("invalid team index: {0}")]
    InvalidTeamIndex(usize),
    #[error("{0} has fainted and cannot battle")]
    CreatureFainted(String),
    #[error("{0} is already in battle")]
    AlreadyActive(String),
}

/// Errors related to loading and saving game state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("i/o failure on {path}: {message}")]
    Io { path: String, message: String },
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("invalid RON: {0}")]
    Ron(String),
    #[error("invalid binary snapshot: {0}")]
    Binary(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Json(err.to_string())
    }
}

impl From<ron::error::SpannedError> for PersistenceError {
    fn from(err: ron::error::SpannedError) -> Self {
        PersistenceError::Ron(err.to_string())
    }
}

impl From<ron::Error> for PersistenceError {
    fn from(err: ron::Error) -> Self {
        PersistenceError::Ron(err.to_string())
    }
}

impl From<postcard::Error> for PersistenceError {
    fn from(err: postcard::Error) -> Self {
        PersistenceError::Binary(err.to_string())
    }
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

/// Type alias for Results using ConstructionError
pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Type alias for Results using RosterError
pub type RosterResult<T> = Result<T, RosterError>;

/// Type alias for Results in battle orchestration
pub type BattleResult<T> = Result<T, GameError>;

/// Type alias for Results using PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;
