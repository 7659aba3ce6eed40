//! Abilities that deal damage without an attack: roar and throw.
//!
//! Direct damage ignores the defender's attack value and the damage floor;
//! it is simply the user's attack power.

use log::info;

use super::{AbilityOutcome, ThrowHit};
use crate::core::state::MatchState;
use crate::error::AbilityError;
use crate::rules::deal_damage;
use crate::units::UnitId;

/// Tiger: hit the enemy king wherever it stands.
pub(super) fn roar(state: &mut MatchState, tiger: UnitId) -> Result<AbilityOutcome, AbilityError> {
    let enemy = state.current_player().opponent();
    let king = state
        .player(enemy)
        .king()
        .filter(|&k| state.unit(k).is_some_and(|u| u.is_on_board()))
        .ok_or(AbilityError::NoEnemyKing)?;
    let damage = state.unit(tiger).map_or(0, |u| u.attack_power);

    let hit = deal_damage(state, king, damage);
    info!("{tiger} roared at {king} for {damage}");
    Ok(AbilityOutcome::Roar {
        king,
        damage,
        defeated: hit.defeated,
    })
}

/// Squirrel: hit both chosen targets.
pub(super) fn throw(state: &mut MatchState, thrower: UnitId, targets: &[UnitId]) -> AbilityOutcome {
    let damage = state.unit(thrower).map_or(0, |u| u.attack_power);
    let hits = targets
        .iter()
        .map(|&target| ThrowHit::from(deal_damage(state, target, damage)))
        .collect();
    info!("{thrower} threw at {targets:?} for {damage} each");
    AbilityOutcome::Thrown { thrower, hits }
}
