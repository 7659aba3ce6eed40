//! Effect resolution - detecting nearby units and applying effects.
//!
//! The protocol after a unit moves:
//! 1. Recompute the mover's nearby set (same bank, within effect range).
//! 2. Derive the effect for every nearby unit and queue it. Nothing is
//!    mutated while scanning.
//! 3. Apply each queued effect, then resolve any flee it caused for either
//!    unit.
//! 4. Repeat 1-3 once for every unit that was near the mover. The cascade
//!    stops there; it is not iterated to a fixed point.

use log::debug;
use smallvec::SmallVec;

use super::flee::resolve_flee;
use super::interaction::{interaction_effect, interaction_range, InteractionEffect};
use crate::core::rng::RandomSource;
use crate::core::state::MatchState;
use crate::units::{Unit, UnitId};

/// Units found by one detection pass.
pub type Nearby = SmallVec<[UnitId; 4]>;

/// Units within interaction range of `source`, in row-major board order.
///
/// Units on opposite banks of the river never interact.
#[must_use]
pub fn detect_nearby(state: &MatchState, source: UnitId) -> Nearby {
    let Some(unit) = state.unit(source) else {
        return Nearby::new();
    };
    let Some(at) = unit.location else {
        return Nearby::new();
    };
    let board = state.board();

    state
        .units_on_board()
        .filter(|other| other.id != source)
        .filter(|other| {
            let Some(other_at) = other.location else {
                return false;
            };
            if board.is_separated_by_river(at, other_at) {
                return false;
            }
            interaction_range(unit.species, other.species)
                .is_some_and(|(_, range)| at.manhattan(other_at) <= range)
        })
        .map(|other| other.id)
        .collect()
}

/// Run one detection pass for `source` and apply everything it finds.
///
/// Returns the nearby set, which is also stored on the unit.
pub fn apply_interactions(state: &mut MatchState, rng: &mut dyn RandomSource, source: UnitId) -> Nearby {
    let nearby = detect_nearby(state, source);
    let Some(species) = state.unit(source).map(|u| u.species) else {
        return nearby;
    };

    let queue: SmallVec<[(UnitId, InteractionEffect); 4]> = nearby
        .iter()
        .filter_map(|&target| {
            state
                .unit(target)
                .map(|u| (target, interaction_effect(species, u.species)))
        })
        .collect();

    if let Some(unit) = state.unit_mut(source) {
        unit.nearby = nearby.clone();
    }

    for (target, effect) in queue {
        apply_effect(state, rng, source, target, effect);
        resolve_flee(state, target);
        resolve_flee(state, source);
    }
    nearby
}

/// The full protocol for a unit that just moved: its own pass, then one
/// pass for each unit that was near it.
pub fn run_detection(state: &mut MatchState, rng: &mut dyn RandomSource, mover: UnitId) {
    let ring = apply_interactions(state, rng, mover);
    for other in ring {
        if state.unit(other).is_some_and(Unit::is_on_board) {
            apply_interactions(state, rng, other);
        }
    }
}

/// Apply a single effect exerted by `source` on `target`.
pub fn apply_effect(
    state: &mut MatchState,
    rng: &mut dyn RandomSource,
    source: UnitId,
    target: UnitId,
    effect: InteractionEffect,
) {
    let modifier_duration = state.config().modifier_duration;
    let paralysis_duration = state.config().paralysis_duration;

    match effect {
        InteractionEffect::None => {}
        InteractionEffect::Attract | InteractionEffect::Repel => {
            if let Some(unit) = state.unit_mut(target) {
                unit.apply_status(effect, modifier_duration, source);
                debug!("{} gets {:?} from {}", unit.name, effect, source);
            }
        }
        InteractionEffect::Paralyze => paralyze(state, source, target, paralysis_duration),
        InteractionEffect::Intimidate => {
            if rng.coin_flip() {
                paralyze(state, source, target, paralysis_duration);
            } else {
                debug!("{source} failed to intimidate {target}");
            }
        }
        InteractionEffect::Pursue => {
            if let Some(unit) = state.unit_mut(source) {
                unit.can_attack_again = true;
            }
            if let Some(unit) = state.unit_mut(target) {
                unit.fleeing_from = Some(source);
            }
            debug!("{source} is pursuing {target}");
        }
        InteractionEffect::Flee => {
            if let Some(unit) = state.unit_mut(source) {
                unit.fleeing_from = Some(target);
            }
            debug!("{source} is fleeing from {target}");
        }
    }
}

fn paralyze(state: &mut MatchState, source: UnitId, target: UnitId, duration: u32) {
    if let Some(unit) = state.unit_mut(target) {
        unit.apply_status(InteractionEffect::Paralyze, duration, source);
        debug!("{} is paralyzed by {}", unit.name, source);
    }
}
