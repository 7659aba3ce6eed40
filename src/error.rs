//! Error taxonomy.
//!
//! Each engine operation has its own error type so callers can match on the
//! exact reason an intent was refused. A returned error always means the
//! match state was left untouched.

use thiserror::Error;

use crate::core::point::Point;
use crate::rules::GamePhase;
use crate::units::{Species, UnitId};

/// A coordinate outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("point {0} is outside the board")]
pub struct OutOfBounds(pub Point);

/// Setup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("board size must be 5 or 7, got {0}")]
    InvalidBoardSize(u8),
    #[error("board size has not been configured")]
    NotConfigured,
    #[error("a match is already in progress")]
    MatchInProgress,
    #[error("kings could not be placed: {0}")]
    KingPlacement(PlacementError),
}

/// Placement refusals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("placement is only allowed during the placement phase, not {0:?}")]
    WrongPhase(GamePhase),
    #[error("it is not this player's turn to place")]
    NotYourTurn,
    #[error("{0} is not in this player's roster")]
    SpeciesNotInRoster(Species),
    #[error("column {0} is outside this player's home bank")]
    OutsideHomeColumns(i32),
    #[error("cell {0} is already occupied")]
    Occupied(Point),
    #[error("units cannot be placed in the river at {0}")]
    RiverCell(Point),
    #[error("roster is full")]
    RosterFull,
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
}

/// Move and attack refusals. The unit keeps its turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("moves are only allowed while playing, not {0:?}")]
    WrongPhase(GamePhase),
    #[error("{0} is not on the board")]
    UnknownUnit(UnitId),
    #[error("{0} does not belong to the current player")]
    NotYourUnit(UnitId),
    #[error("{0} has already acted this turn")]
    AlreadyActed(UnitId),
    #[error("{0} is paralyzed and cannot attack")]
    Paralyzed(UnitId),
    #[error("distance {distance} is outside the move range {range}")]
    OutOfRange { distance: u32, range: i32 },
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
    #[error("illegal river crossing to {0}")]
    RiverCrossing(Point),
    #[error("cannot stop in the river at {0}")]
    RiverCell(Point),
    #[error("destination {0} holds a friendly unit")]
    FriendlyOccupied(Point),
    #[error("destination {0} is blocked")]
    Blocked(Point),
    #[error("moves must be purely horizontal or vertical")]
    NotStraight,
    #[error("path to {0} is blocked")]
    PathBlocked(Point),
}

/// Special ability refusals. Nothing is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbilityError {
    #[error("abilities are only usable while playing, not {0:?}")]
    WrongPhase(GamePhase),
    #[error("{0} is not on the board")]
    UnknownUnit(UnitId),
    #[error("{0} does not belong to the current player")]
    NotYourUnit(UnitId),
    #[error("{0} has already acted this turn")]
    AlreadyActed(UnitId),
    #[error("{0} has no active ability")]
    NoActiveAbility(Species),
    #[error("ability already used this match")]
    AlreadyUsed,
    #[error("the enemy king is gone")]
    NoEnemyKing,
    #[error("not enough enemy targets")]
    NotEnoughTargets,
    #[error("no friendly unit can be rallied")]
    NoEligibleUnit,
    #[error("no friendly unit to revive")]
    NoDeadPieces,
    #[error("no empty cell next to the king")]
    NoFreeCell,
    #[error("rally walk refused: {0}")]
    RallyMove(MoveError),
}

/// Squirrel target selection refusals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("targets can only be selected during the squirrel ability, not {0:?}")]
    WrongPhase(GamePhase),
    #[error("{0} is not on the board")]
    UnknownUnit(UnitId),
    #[error("{0} is not an enemy unit")]
    NotAnEnemy(UnitId),
    #[error("{0} is already selected")]
    Duplicate(UnitId),
}

/// Any engine error, for callers that drive the engine generically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Ability(#[from] AbilityError),
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error("no species chosen for placement")]
    NoPendingSpecies,
    #[error("the match is over")]
    GameOver,
}
