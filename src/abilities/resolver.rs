//! Ability dispatch and the squirrel target sub-phase.

use log::{debug, info};

use super::direct_damage::{roar, throw};
use super::royal::{rally, revive};
use super::AbilityOutcome;
use crate::core::rng::{RandomSource, ScriptedRandom};
use crate::core::state::{MatchState, PendingThrow};
use crate::error::{AbilityError, TargetError};
use crate::rules::GamePhase;
use crate::units::{Species, Unit, UnitId};

/// Preconditions shared by every ability.
fn check_ready(state: &MatchState, id: UnitId) -> Result<Species, AbilityError> {
    if state.phase() != GamePhase::Playing {
        return Err(AbilityError::WrongPhase(state.phase()));
    }
    let unit = state
        .unit(id)
        .filter(|u| u.is_on_board())
        .ok_or(AbilityError::UnknownUnit(id))?;
    if unit.owner != state.current_player() {
        return Err(AbilityError::NotYourUnit(id));
    }
    if !unit.can_move_and_attack {
        return Err(AbilityError::AlreadyActed(id));
    }
    if !unit.species.has_active_ability() {
        return Err(AbilityError::NoActiveAbility(unit.species));
    }
    if unit.has_used_special_ability {
        return Err(AbilityError::AlreadyUsed);
    }
    Ok(unit.species)
}

/// Use the special ability of a unit.
///
/// On success the ability is marked used. Abilities that end the turn also
/// spend the unit's action; turn handover is left to the caller.
pub fn use_special_ability(
    state: &mut MatchState,
    rng: &mut dyn RandomSource,
    id: UnitId,
) -> Result<AbilityOutcome, AbilityError> {
    let species = check_ready(state, id)?;

    let outcome = match species {
        Species::Leopard => {
            if let Some(unit) = state.unit_mut(id) {
                unit.crosses_river_freely = true;
            }
            AbilityOutcome::RiverCrossing { unit: id }
        }
        Species::Tiger => roar(state, id)?,
        Species::Squirrel => begin_throw(state, id)?,
        Species::CatKing => rally(state, rng, id)?,
        Species::MouseKing => revive(state, rng, id)?,
        Species::Mouse => return Err(AbilityError::NoActiveAbility(species)),
    };

    if let Some(unit) = state.unit_mut(id) {
        unit.has_used_special_ability = true;
        if outcome.ends_turn() {
            unit.can_move_and_attack = false;
        }
        info!("{} used its ability", unit.name);
    }
    Ok(outcome)
}

/// True if using the ability of `id` would be accepted right now.
///
/// Runs the ability on a copy of the match; random picks never decide
/// whether an ability is accepted, so a scripted source is enough.
#[must_use]
pub fn can_use_ability(state: &MatchState, id: UnitId) -> bool {
    if !state.unit(id).is_some_and(Unit::ability_ready) {
        return false;
    }
    let mut probe = state.clone();
    use_special_ability(&mut probe, &mut ScriptedRandom::new(), id).is_ok()
}

fn begin_throw(state: &mut MatchState, thrower: UnitId) -> Result<AbilityOutcome, AbilityError> {
    let enemy = state.current_player().opponent();
    if state.pieces_on_board(enemy).len() < 2 {
        return Err(AbilityError::NotEnoughTargets);
    }
    state.pending_throw = Some(PendingThrow {
        thrower,
        targets: Default::default(),
    });
    state.phase = GamePhase::SquirrelAbility;
    Ok(AbilityOutcome::AwaitingTargets { thrower })
}

/// Add a throw target. Returns the throw once the second target is chosen.
pub fn select_throw_target(state: &mut MatchState, target: UnitId) -> Result<Option<AbilityOutcome>, TargetError> {
    if state.phase() != GamePhase::SquirrelAbility {
        return Err(TargetError::WrongPhase(state.phase()));
    }
    let unit = state
        .unit(target)
        .filter(|u| u.is_on_board())
        .ok_or(TargetError::UnknownUnit(target))?;
    if unit.owner == state.current_player() {
        return Err(TargetError::NotAnEnemy(target));
    }
    let Some(pending) = state.pending_throw.as_mut() else {
        return Err(TargetError::WrongPhase(GamePhase::SquirrelAbility));
    };
    if pending.targets.contains(&target) {
        return Err(TargetError::Duplicate(target));
    }
    pending.targets.push(target);
    debug!("throw target {} of 2: {target}", pending.targets.len());
    if pending.targets.len() < 2 {
        return Ok(None);
    }

    let PendingThrow { thrower, targets } = pending.clone();
    state.pending_throw = None;
    state.phase = GamePhase::Playing;
    if let Some(unit) = state.unit_mut(thrower) {
        unit.can_move_and_attack = false;
    }
    Ok(Some(throw(state, thrower, &targets)))
}

/// Leave the target sub-phase. The squirrel keeps its ability.
pub fn cancel_throw(state: &mut MatchState) -> Result<(), TargetError> {
    if state.phase() != GamePhase::SquirrelAbility {
        return Err(TargetError::WrongPhase(state.phase()));
    }
    if let Some(pending) = state.pending_throw.take() {
        if let Some(unit) = state.unit_mut(pending.thrower) {
            unit.has_used_special_ability = false;
            unit.can_move_and_attack = true;
        }
    }
    state.phase = GamePhase::Playing;
    info!("squirrel throw cancelled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BoardSize, MatchConfig};
    use crate::core::player::PlayerId;
    use crate::core::point::Point;
    use crate::core::rng::ScriptedRandom;

    fn playing() -> MatchState {
        let mut state = MatchState::new(MatchConfig::new(BoardSize::Seven));
        state.phase = GamePhase::Playing;
        state.turn_number = 1;
        state
    }

    #[test]
    fn test_shared_preconditions() {
        let mut state = playing();
        let mut rng = ScriptedRandom::new();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::FIRST, Point::new(0, 0)).unwrap();
        let leopard = state.spawn_unit(Species::Leopard, PlayerId::FIRST, Point::new(1, 0)).unwrap();
        let enemy = state.spawn_unit(Species::Tiger, PlayerId::SECOND, Point::new(5, 0)).unwrap();

        assert_eq!(
            use_special_ability(&mut state, &mut rng, mouse),
            Err(AbilityError::NoActiveAbility(Species::Mouse))
        );
        assert_eq!(
            use_special_ability(&mut state, &mut rng, enemy),
            Err(AbilityError::NotYourUnit(enemy))
        );

        state.unit_mut(leopard).unwrap().can_move_and_attack = false;
        assert_eq!(
            use_special_ability(&mut state, &mut rng, leopard),
            Err(AbilityError::AlreadyActed(leopard))
        );
        assert!(!state.unit(leopard).unwrap().has_used_special_ability);
    }

    #[test]
    fn test_leopard_ability_keeps_turn() {
        let mut state = playing();
        let mut rng = ScriptedRandom::new();
        let leopard = state.spawn_unit(Species::Leopard, PlayerId::FIRST, Point::new(1, 0)).unwrap();

        assert_eq!(
            use_special_ability(&mut state, &mut rng, leopard),
            Ok(AbilityOutcome::RiverCrossing { unit: leopard })
        );
        let unit = state.unit(leopard).unwrap();
        assert!(unit.crosses_river_freely);
        assert!(unit.has_used_special_ability);
        assert!(unit.can_move_and_attack);

        assert_eq!(
            use_special_ability(&mut state, &mut rng, leopard),
            Err(AbilityError::AlreadyUsed)
        );
    }

    fn throw_setup() -> (MatchState, UnitId, UnitId, UnitId) {
        let mut state = playing();
        let squirrel = state.spawn_unit(Species::Squirrel, PlayerId::FIRST, Point::new(1, 1)).unwrap();
        let a = state.spawn_unit(Species::Leopard, PlayerId::SECOND, Point::new(5, 1)).unwrap();
        let b = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(5, 5)).unwrap();
        (state, squirrel, a, b)
    }

    #[test]
    fn test_squirrel_throw_flow() {
        let (mut state, squirrel, a, b) = throw_setup();
        let mut rng = ScriptedRandom::new();

        assert_eq!(
            use_special_ability(&mut state, &mut rng, squirrel),
            Ok(AbilityOutcome::AwaitingTargets { thrower: squirrel })
        );
        assert_eq!(state.phase(), GamePhase::SquirrelAbility);
        assert!(state.unit(squirrel).unwrap().can_move_and_attack);

        assert_eq!(select_throw_target(&mut state, squirrel), Err(TargetError::NotAnEnemy(squirrel)));
        assert_eq!(select_throw_target(&mut state, a), Ok(None));
        assert_eq!(select_throw_target(&mut state, a), Err(TargetError::Duplicate(a)));

        let Some(AbilityOutcome::Thrown { hits, .. }) = select_throw_target(&mut state, b).unwrap() else {
            panic!("throw should resolve on the second target");
        };
        assert_eq!(hits.len(), 2);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.pending_throw().is_none());
        // leopard 3 - 2
        assert_eq!(state.unit(a).unwrap().health, 1);
        // the mouse survives on its charge
        assert_eq!(state.unit(b).unwrap().health, 1);
        assert!(!state.unit(squirrel).unwrap().can_move_and_attack);
    }

    #[test]
    fn test_cancel_throw_restores_ability() {
        let (mut state, squirrel, _, _) = throw_setup();
        let mut rng = ScriptedRandom::new();
        use_special_ability(&mut state, &mut rng, squirrel).unwrap();

        cancel_throw(&mut state).unwrap();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(!state.unit(squirrel).unwrap().has_used_special_ability);
        assert_eq!(cancel_throw(&mut state), Err(TargetError::WrongPhase(GamePhase::Playing)));
    }

    #[test]
    fn test_throw_needs_two_enemies() {
        let (mut state, squirrel, a, _) = throw_setup();
        let mut rng = ScriptedRandom::new();
        state.defeat_unit(a);
        assert_eq!(
            use_special_ability(&mut state, &mut rng, squirrel),
            Err(AbilityError::NotEnoughTargets)
        );
        assert!(!state.unit(squirrel).unwrap().has_used_special_ability);
    }
}
