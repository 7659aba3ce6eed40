//! Players, per-player storage and piece ownership.
//!
//! ## PlayerId
//!
//! The game is strictly two-player. `PlayerId::FIRST` starts on the left bank
//! with the Cat faction, `PlayerId::SECOND` on the right bank with the Mouse
//! faction.
//!
//! ## Player
//!
//! A `Player` is the canonical owner of its units: the live piece list, the
//! dead roster and the king reference all live here. A unit only reaches the
//! dead roster through [`Player::remove_piece`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::units::{Faction, Species, UnitId};

/// Player identifier, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Left bank, Cat faction, moves first.
    pub const FIRST: PlayerId = PlayerId(0);
    /// Right bank, Mouse faction.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Both players in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::FIRST, PlayerId::SECOND];

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    /// Faction of the units this player places.
    #[must_use]
    pub const fn home_faction(self) -> Faction {
        match self.0 {
            0 => Faction::Cat,
            _ => Faction::Mouse,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Build both entries from a factory.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Both entries set to default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A participant in the match and the owner of its units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Who this is.
    pub id: PlayerId,
    /// Assigned species: two regular species plus one king species.
    roster: SmallVec<[Species; 3]>,
    /// Live pieces, king included.
    pieces: Vec<UnitId>,
    /// Defeated pieces, in order of defeat.
    dead: Vec<UnitId>,
    /// The king while it is still owned and alive.
    king: Option<UnitId>,
    /// Number of faction exchanges this player took part in.
    pub exchange_count: u32,
}

impl Player {
    /// A player with an empty roster.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            roster: SmallVec::new(),
            pieces: Vec::new(),
            dead: Vec::new(),
            king: None,
            exchange_count: 0,
        }
    }

    /// Add a species to the roster.
    ///
    /// At most two regular species are accepted; king species are always
    /// accepted. Returns false if the species was refused.
    pub fn assign_species(&mut self, species: Species) -> bool {
        let regular = self.roster.iter().filter(|s| !s.is_king()).count();
        if species.is_king() || regular < 2 {
            self.roster.push(species);
            true
        } else {
            false
        }
    }

    /// Assigned species, king included.
    #[must_use]
    pub fn roster(&self) -> &[Species] {
        &self.roster
    }

    /// Species this player may place during the placement phase.
    pub fn placeable_species(&self) -> impl Iterator<Item = Species> + '_ {
        self.roster.iter().copied().filter(|s| !s.is_king())
    }

    /// Live pieces, king included.
    #[must_use]
    pub fn pieces(&self) -> &[UnitId] {
        &self.pieces
    }

    /// Defeated pieces.
    #[must_use]
    pub fn dead_pieces(&self) -> &[UnitId] {
        &self.dead
    }

    /// The king, if still owned.
    #[must_use]
    pub fn king(&self) -> Option<UnitId> {
        self.king
    }

    /// True if the unit is one of this player's live pieces.
    #[must_use]
    pub fn owns(&self, unit: UnitId) -> bool {
        self.pieces.contains(&unit)
    }

    /// Take ownership of a live piece.
    ///
    /// A king becomes this player's king unless the player already has one.
    pub fn add_piece(&mut self, unit: UnitId, is_king: bool) {
        if !self.pieces.contains(&unit) {
            self.pieces.push(unit);
        }
        if is_king && self.king.is_none() {
            self.king = Some(unit);
        }
    }

    /// Move a live piece to the dead roster.
    ///
    /// Returns false (and changes nothing) if the unit is not a live piece,
    /// so a unit can reach the dead roster only once.
    pub fn remove_piece(&mut self, unit: UnitId) -> bool {
        if !self.release_piece(unit) {
            return false;
        }
        self.dead.push(unit);
        true
    }

    /// Give up a live piece without it dying (used by the exchange rule).
    pub fn release_piece(&mut self, unit: UnitId) -> bool {
        let Some(pos) = self.pieces.iter().position(|&p| p == unit) else {
            return false;
        };
        self.pieces.remove(pos);
        if self.king == Some(unit) {
            self.king = None;
        }
        true
    }

    /// Bring a dead piece back to the live list.
    pub fn revive_piece(&mut self, unit: UnitId) -> bool {
        let Some(pos) = self.dead.iter().position(|&p| p == unit) else {
            return false;
        };
        self.dead.remove(pos);
        self.pieces.push(unit);
        true
    }
}
