//! Attacks, direct damage and the faction exchange.

use log::{debug, info};

use super::phase::Outcome;
use crate::core::state::MatchState;
use crate::error::MoveError;
use crate::units::{Faction, Species, UnitId};

/// Result of damage dealt outside a regular attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub target: UnitId,
    pub damage: i32,
    pub defeated: bool,
}

/// Resolve an attack that already passed move validation.
///
/// The attacker stays on its cell. Any pursuit bonus is spent by the attack,
/// and so is the unit's action for the turn.
pub(crate) fn resolve_attack(state: &mut MatchState, attacker: UnitId, target: UnitId) -> Result<Outcome, MoveError> {
    let floor = state.config().damage_floor;
    let damage = {
        let a = state.unit(attacker).ok_or(MoveError::UnknownUnit(attacker))?;
        let d = state.unit(target).ok_or(MoveError::UnknownUnit(target))?;
        a.attack_damage(d, floor).ok_or(MoveError::Paralyzed(attacker))?
    };

    if let Some(unit) = state.unit_mut(attacker) {
        unit.can_attack_again = false;
        unit.can_move_and_attack = false;
    }

    let hit = deal_damage(state, target, damage);
    debug!("{attacker} hit {target} for {damage}");

    let exchanged = !hit.defeated && can_exchange(state, attacker, target);
    if exchanged {
        exchange(state, attacker, target);
    }

    Ok(Outcome::Attacked {
        target,
        damage,
        defeated: hit.defeated,
        exchanged,
    })
}

/// Subtract health from a unit and take it off the board if that killed it.
pub(crate) fn deal_damage(state: &mut MatchState, target: UnitId, damage: i32) -> Hit {
    let Some(unit) = state.unit_mut(target) else {
        return Hit { target, damage, defeated: false };
    };
    let report = unit.take_damage(damage);
    if report.survival_triggered {
        info!("{} clings on with 1 health", unit.name);
    }
    let defeated = report.is_lethal();
    if defeated {
        info!("{} was defeated", unit.name);
        state.defeat_unit(target);
    }
    Hit { target, damage, defeated }
}

/// True if an attack by `attacker` on a surviving `defender` triggers an
/// exchange.
///
/// Two triggers exist: a Mouse-faction big cat hitting the cat king, and a
/// Cat-faction mouse hitting anything. Each player takes part in at most
/// one exchange per match.
#[must_use]
pub fn can_exchange(state: &MatchState, attacker: UnitId, defender: UnitId) -> bool {
    let (Some(a), Some(d)) = (state.unit(attacker), state.unit(defender)) else {
        return false;
    };
    if a.owner == d.owner || !d.is_on_board() {
        return false;
    }
    let turncoat_cat = a.species.is_big_cat() && a.faction == Faction::Mouse && d.species == Species::CatKing;
    let turncoat_mouse = a.species == Species::Mouse && a.faction == Faction::Cat;

    (turncoat_cat || turncoat_mouse)
        && state.player(a.owner).exchange_count == 0
        && state.player(d.owner).exchange_count == 0
}

/// Swap owner, cell and faction of two units.
pub(crate) fn exchange(state: &mut MatchState, attacker: UnitId, defender: UnitId) {
    let (Some(a_owner), Some(d_owner)) = (
        state.unit(attacker).map(|u| u.owner),
        state.unit(defender).map(|u| u.owner),
    ) else {
        return;
    };

    state.transfer_unit(attacker, d_owner);
    state.transfer_unit(defender, a_owner);
    state.swap_units(attacker, defender);
    for id in [attacker, defender] {
        if let Some(unit) = state.unit_mut(id) {
            unit.switch_faction();
        }
    }
    state.player_mut(a_owner).exchange_count += 1;
    state.player_mut(d_owner).exchange_count += 1;
    info!("{attacker} and {defender} changed sides");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BoardSize, MatchConfig};
    use crate::core::player::PlayerId;
    use crate::core::point::Point;

    fn state() -> MatchState {
        MatchState::new(MatchConfig::new(BoardSize::Seven))
    }

    #[test]
    fn test_attack_uses_floor_and_survival() {
        let mut state = state();
        let leopard = state.spawn_unit(Species::Leopard, PlayerId::FIRST, Point::new(1, 3)).unwrap();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(2, 3)).unwrap();

        let outcome = resolve_attack(&mut state, leopard, mouse).unwrap();
        assert_eq!(
            outcome,
            Outcome::Attacked { target: mouse, damage: 2, defeated: false, exchanged: false }
        );
        assert_eq!(state.unit(mouse).unwrap().health, 1);
        assert!(!state.unit(leopard).unwrap().can_move_and_attack);
    }

    #[test]
    fn test_lethal_attack_removes_defender() {
        let mut state = state();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(1, 1)).unwrap();
        let leopard = state.spawn_unit(Species::Leopard, PlayerId::SECOND, Point::new(1, 2)).unwrap();
        state.unit_mut(tiger).unwrap().can_attack_again = true;

        let outcome = resolve_attack(&mut state, tiger, leopard).unwrap();
        assert!(outcome.defeated());
        assert!(state.board().is_empty(Point::new(1, 2)));
        assert_eq!(state.player(PlayerId::SECOND).dead_pieces(), &[leopard]);
        assert!(!state.unit(tiger).unwrap().can_attack_again);
    }

    #[test]
    fn test_paralyzed_attacker_is_refused() {
        let mut state = state();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(1, 1)).unwrap();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(1, 2)).unwrap();
        state.unit_mut(tiger).unwrap().can_attack = false;
        assert_eq!(resolve_attack(&mut state, tiger, mouse), Err(MoveError::Paralyzed(tiger)));
        assert_eq!(state.unit(mouse).unwrap().health, 1);
    }

    #[test]
    fn test_cat_faction_mouse_triggers_exchange() {
        let mut state = state();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::FIRST, Point::new(1, 1)).unwrap();
        let squirrel = state.spawn_unit(Species::Squirrel, PlayerId::SECOND, Point::new(1, 2)).unwrap();
        assert_eq!(state.unit(mouse).unwrap().faction, Faction::Cat);

        let outcome = resolve_attack(&mut state, mouse, squirrel).unwrap();
        assert_eq!(
            outcome,
            Outcome::Attacked { target: squirrel, damage: 3, defeated: false, exchanged: true }
        );

        let m = state.unit(mouse).unwrap();
        assert_eq!(m.owner, PlayerId::SECOND);
        assert_eq!(m.faction, Faction::Mouse);
        assert_eq!(m.location, Some(Point::new(1, 2)));
        let s = state.unit(squirrel).unwrap();
        assert_eq!(s.owner, PlayerId::FIRST);
        assert_eq!(s.location, Some(Point::new(1, 1)));
        assert_eq!(state.player(PlayerId::FIRST).exchange_count, 1);
        assert_eq!(state.player(PlayerId::SECOND).exchange_count, 1);
    }

    #[test]
    fn test_exchange_happens_once_per_player() {
        let mut state = state();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::FIRST, Point::new(1, 1)).unwrap();
        let squirrel = state.spawn_unit(Species::Squirrel, PlayerId::SECOND, Point::new(1, 2)).unwrap();
        state.player_mut(PlayerId::SECOND).exchange_count = 1;
        assert!(!can_exchange(&state, mouse, squirrel));
    }

    #[test]
    fn test_turncoat_cat_only_exchanges_with_cat_king() {
        let mut state = state();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::SECOND, Point::new(1, 2)).unwrap();
        let king = state.spawn_unit(Species::CatKing, PlayerId::FIRST, Point::new(0, 2)).unwrap();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::FIRST, Point::new(1, 3)).unwrap();
        assert_eq!(state.unit(tiger).unwrap().faction, Faction::Mouse);

        assert!(can_exchange(&state, tiger, king));
        assert!(!can_exchange(&state, tiger, mouse));
    }

    #[test]
    fn test_deal_damage_reports_kill() {
        let mut state = state();
        let squirrel = state.spawn_unit(Species::Squirrel, PlayerId::SECOND, Point::new(5, 5)).unwrap();
        assert_eq!(
            deal_damage(&mut state, squirrel, 2),
            Hit { target: squirrel, damage: 2, defeated: false }
        );
        assert!(deal_damage(&mut state, squirrel, 3).defeated);
        assert_eq!(state.unit(squirrel).unwrap().location, None);
    }
}
