//! Unit instances - runtime unit state.
//!
//! `Unit` is the central entity of the engine. It carries the species stats
//! it was created with, its mutable health, the per-turn action flags and the
//! bookkeeping of the interaction effect system.
//!
//! Units live in the match's unit arena and are referred to by [`UnitId`]
//! everywhere else (cells, players, effect sources). A unit's `location` is
//! only written by the match state when the unit is put on or taken off a
//! cell, which keeps cell occupancy and unit location consistent.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::species::{Faction, Species};
use crate::core::player::PlayerId;
use crate::core::point::Point;
use crate::effects::InteractionEffect;

/// Unique identifier of a unit within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Result of applying damage to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    /// Damage requested by the attacker.
    pub requested: i32,
    /// Health after the hit.
    pub health_after: i32,
    /// The mouse survival charge absorbed a lethal hit.
    pub survival_triggered: bool,
}

impl DamageReport {
    /// The unit must leave the board.
    #[must_use]
    pub fn is_lethal(&self) -> bool {
        self.health_after <= 0
    }
}

/// A unit in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Arena identifier.
    pub id: UnitId,

    /// Display name, e.g. `Leopard_1`.
    pub name: String,

    /// Species tag.
    pub species: Species,

    /// Current faction.
    pub faction: Faction,

    /// Current owner.
    pub owner: PlayerId,

    // === Combat ===
    pub attack_power: i32,
    pub health: i32,
    pub max_health: i32,
    pub attack_range: u32,

    // === Movement ===
    pub max_move_distance: i32,
    /// Transient modifier from attract (+1), repel and paralysis (-1).
    pub move_distance_modifier: i32,

    /// Board position while on the board.
    pub location: Option<Point>,

    // === Turn flags ===
    pub can_move_and_attack: bool,
    pub has_used_special_ability: bool,
    pub has_fled_this_turn: bool,
    /// Pursuit bonus: may attack after acting, with doubled damage.
    pub can_attack_again: bool,
    /// False while paralyzed.
    pub can_attack: bool,
    pub is_paralyzed: bool,
    /// Leopard capability, permanent once activated.
    pub crosses_river_freely: bool,

    /// Remaining lethal hits the unit shrugs off at 1 health.
    survival_charges: u8,

    // === Effect bookkeeping ===
    pub current_effect: InteractionEffect,
    /// End-of-turn sweeps left before the effect resets.
    pub effect_duration: u32,
    pub effect_source: Option<UnitId>,
    pub fleeing_from: Option<UnitId>,
    /// Units in interaction range as of the last detection pass.
    pub nearby: SmallVec<[UnitId; 4]>,
}

impl Unit {
    /// Create a unit with its species' base stats.
    ///
    /// Kings start at `king_health`; every other species uses its table value.
    #[must_use]
    pub fn new(id: UnitId, species: Species, owner: PlayerId, faction: Faction, king_health: i32) -> Self {
        let stats = species.stats();
        let health = if species.is_king() { king_health } else { stats.health };
        Self {
            id,
            name: format!("{}_{}", species.name(), owner.index() + 1),
            species,
            faction,
            owner,
            attack_power: stats.attack,
            health,
            max_health: health,
            attack_range: stats.attack_range,
            max_move_distance: stats.move_distance,
            move_distance_modifier: 0,
            location: None,
            can_move_and_attack: true,
            has_used_special_ability: false,
            has_fled_this_turn: false,
            can_attack_again: false,
            can_attack: true,
            is_paralyzed: false,
            crosses_river_freely: false,
            survival_charges: u8::from(species == Species::Mouse),
            current_effect: InteractionEffect::None,
            effect_duration: 0,
            effect_source: None,
            fleeing_from: None,
            nearby: SmallVec::new(),
        }
    }

    /// Display tag.
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        self.species.emoji()
    }

    /// True while health is positive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// True while the unit stands on a cell.
    #[must_use]
    pub fn is_on_board(&self) -> bool {
        self.location.is_some()
    }

    /// Remaining survival charges.
    #[must_use]
    pub fn survival_charges(&self) -> u8 {
        self.survival_charges
    }

    /// True if the unit could try its active ability now.
    #[must_use]
    pub fn ability_ready(&self) -> bool {
        self.species.has_active_ability() && !self.has_used_special_ability && self.can_move_and_attack
    }

    /// Movement range after effects.
    ///
    /// The mouse king ignores modifiers entirely.
    #[must_use]
    pub fn modified_move_distance(&self) -> i32 {
        if self.species == Species::MouseKing {
            return self.max_move_distance;
        }
        (self.max_move_distance + self.move_distance_modifier).max(0)
    }

    /// Damage this unit would deal to `target`, or `None` while it cannot attack.
    ///
    /// `max(floor, attack - target.attack)`, doubled while the pursuit bonus
    /// is held.
    #[must_use]
    pub fn attack_damage(&self, target: &Unit, floor: i32) -> Option<i32> {
        if !self.can_attack {
            return None;
        }
        let base = (self.attack_power - target.attack_power).max(floor.max(1));
        Some(if self.can_attack_again { base * 2 } else { base })
    }

    /// Subtract damage, consulting the survival charge first.
    pub fn take_damage(&mut self, damage: i32) -> DamageReport {
        let survival_triggered = self.health - damage <= 0 && self.survival_charges > 0;
        if survival_triggered {
            self.survival_charges -= 1;
            self.health = 1;
        } else {
            self.health -= damage;
        }
        DamageReport {
            requested: damage,
            health_after: self.health,
            survival_triggered,
        }
    }

    /// Restore health up to `cap`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32, cap: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(cap).max(before);
        self.health - before
    }

    /// Swap to the other faction.
    pub fn switch_faction(&mut self) {
        self.faction = self.faction.flipped();
    }

    /// Apply a timed status to this unit.
    ///
    /// Attract and repel set the move modifier; paralyze additionally
    /// disables attacking. An active paralysis is not overridden by attract
    /// or repel.
    pub fn apply_status(&mut self, effect: InteractionEffect, duration: u32, source: UnitId) {
        if self.is_paralyzed && effect != InteractionEffect::Paralyze {
            return;
        }
        match effect {
            InteractionEffect::Attract => self.move_distance_modifier = 1,
            InteractionEffect::Repel => self.move_distance_modifier = -1,
            InteractionEffect::Paralyze => {
                self.move_distance_modifier = -1;
                self.is_paralyzed = true;
                self.can_attack = false;
            }
            _ => return,
        }
        self.current_effect = effect;
        self.effect_duration = duration;
        self.effect_source = Some(source);
    }

    /// Count down the current effect. Returns true if it just expired.
    pub fn tick_effect(&mut self) -> bool {
        if self.effect_duration == 0 {
            return false;
        }
        self.effect_duration -= 1;
        if self.effect_duration == 0 {
            self.reset_effects();
            return true;
        }
        false
    }

    /// Back to the effect baseline.
    pub fn reset_effects(&mut self) {
        self.current_effect = InteractionEffect::None;
        self.effect_duration = 0;
        self.move_distance_modifier = 0;
        self.can_attack = true;
        self.is_paralyzed = false;
        self.fleeing_from = None;
        self.effect_source = None;
    }

    /// Refresh the per-turn flags at the start of the owner's turn.
    pub fn start_turn(&mut self) {
        self.can_move_and_attack = true;
        self.has_fled_this_turn = false;
    }

    /// Prepare a dead unit to return to the board.
    pub fn revive(&mut self) {
        self.health = 1;
        self.reset_effects();
        self.can_attack_again = false;
        self.can_move_and_attack = false;
        self.nearby.clear();
    }

    /// Active statuses in display form.
    #[must_use]
    pub fn effect_summary(&self) -> Vec<&'static str> {
        let mut effects = Vec::new();
        if self.fleeing_from.is_some() {
            effects.push("Fleeing");
        }
        if self.can_attack_again {
            effects.push("Pursuing");
        }
        if self.move_distance_modifier > 0 {
            effects.push("Attracted");
        }
        if self.move_distance_modifier < 0 && !self.is_paralyzed {
            effects.push("Repelled");
        }
        if self.is_paralyzed {
            effects.push("Paralyzed");
        }
        effects
    }
}
