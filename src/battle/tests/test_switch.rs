#[cfg(test)]
mod tests {
    use crate::battle::runner::PlayerAction;
    use crate::battle::state::{BattleEvent, BattlePhase, Side, TurnRng};
    use crate::battle::tests::common::{assert_ok, create_team_battle, TestCreatureBuilder};
    use crate::errors::{ActionError, BattleStateError, GameError};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_voluntary_switch_lets_opponent_attack() {
        let mut battle = create_team_battle(
            vec![
                TestCreatureBuilder::new("Pikachu").build(),
                TestCreatureBuilder::new("Eevee").build(),
            ],
            vec![TestCreatureBuilder::new("Rattata").build()],
        );
        // opponent picks Tackle, opponent hit
        let mut rng = TurnRng::new_for_test(vec![1, 50]);

        let events = assert_ok(battle.play_turn(PlayerAction::SwitchCreature { team_index: 1 }, &mut rng));

        assert_eq!(
            events[0],
            BattleEvent::CreatureSwitched {
                side: Side::Player,
                from: "Pikachu".to_string(),
                to: "Eevee".to_string(),
                forced: false,
            }
        );
        assert_eq!(battle.player_team().active().name(), "Eevee");
        assert_eq!(battle.player_team().active().hp(), 45);
        assert_eq!(battle.player_team().members()[0].hp(), 50);
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
    }

    #[test]
    fn test_forced_switch_grants_no_attack() {
        let mut battle = create_team_battle(
            vec![
                TestCreatureBuilder::new("Pikachu").with_hp(1).build(),
                TestCreatureBuilder::new("Eevee").build(),
            ],
            vec![TestCreatureBuilder::new("Rattata").build()],
        );
        let mut rng = TurnRng::new_for_test(vec![50, 1, 50]);

        assert_ok(battle.play_turn(PlayerAction::UseMove { move_index: 0 }, &mut rng));
        assert_eq!(battle.phase(), BattlePhase::ForcedSwitch);
        assert_eq!(
            battle.valid_actions(),
            vec![PlayerAction::SwitchCreature { team_index: 1 }]
        );

        // Attacking is not an option while a replacement is owed.
        assert_eq!(
            battle.submit(PlayerAction::UseMove { move_index: 0 }, &mut rng),
            Err(GameError::BattleState(BattleStateError::NotAllowedInPhase {
                action: "UseMove",
                phase: "ForcedSwitch"
            }))
        );
        assert_eq!(
            battle.submit(PlayerAction::Forfeit, &mut rng),
            Err(GameError::BattleState(BattleStateError::NotAllowedInPhase {
                action: "Forfeit",
                phase: "ForcedSwitch"
            }))
        );

        // An empty RNG proves the opponent does not act after the replacement.
        let mut no_rolls = TurnRng::new_for_test(vec![]);
        let events = assert_ok(battle.play_turn(
            PlayerAction::SwitchCreature { team_index: 1 },
            &mut no_rolls,
        ));

        assert!(events.iter().all(|e| !matches!(e, BattleEvent::AttackResolved { .. })));
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
        assert_eq!(battle.player_team().active().name(), "Eevee");
        assert_eq!(battle.player_team().active().hp(), 50);
    }

    #[test]
    fn test_forced_switch_rejects_fainted_target() {
        let mut battle = create_team_battle(
            vec![
                TestCreatureBuilder::new("Pikachu").with_hp(1).build(),
                TestCreatureBuilder::new("Eevee").build(),
            ],
            vec![TestCreatureBuilder::new("Rattata").build()],
        );
        let mut rng = TurnRng::new_for_test(vec![50, 1, 50]);
        assert_ok(battle.play_turn(PlayerAction::UseMove { move_index: 0 }, &mut rng));

        assert_eq!(
            battle.submit(PlayerAction::SwitchCreature { team_index: 0 }, &mut rng),
            Err(GameError::Action(ActionError::CreatureFainted("Pikachu".to_string())))
        );
        assert_eq!(battle.phase(), BattlePhase::ForcedSwitch);
    }

    #[test]
    fn test_invalid_switch_targets() {
        let mut battle = create_team_battle(
            vec![
                TestCreatureBuilder::new("Pikachu").build(),
                TestCreatureBuilder::new("Eevee").with_hp(0).build(),
            ],
            vec![TestCreatureBuilder::new("Rattata").build()],
        );
        let mut rng = TurnRng::new_for_test(vec![]);
        let events_before = battle.events().len();

        assert_eq!(
            battle.submit(PlayerAction::SwitchCreature { team_index: 0 }, &mut rng),
            Err(GameError::Action(ActionError::AlreadyActive("Pikachu".to_string())))
        );
        assert_eq!(
            battle.submit(PlayerAction::SwitchCreature { team_index: 1 }, &mut rng),
            Err(GameError::Action(ActionError::CreatureFainted("Eevee".to_string())))
        );
        assert_eq!(
            battle.submit(PlayerAction::SwitchCreature { team_index: 5 }, &mut rng),
            Err(GameError::Action(ActionError::InvalidTeamIndex(5)))
        );
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
        assert_eq!(battle.events().len(), events_before);
    }

    #[test]
    fn test_fainted_lead_is_skipped_at_start() {
        let battle = create_team_battle(
            vec![
                TestCreatureBuilder::new("Pikachu").with_hp(0).build(),
                TestCreatureBuilder::new("Eevee").build(),
            ],
            vec![TestCreatureBuilder::new("Rattata").build()],
        );
        assert_eq!(battle.player_team().active().name(), "Eevee");
        assert_eq!(
            battle.events().events()[0],
            BattleEvent::BattleStarted {
                player: "Eevee".to_string(),
                opponent: "Rattata".to_string()
            }
        );
    }
}
