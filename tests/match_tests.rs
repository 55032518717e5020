use naval_duel::{
    GuessResult, Match, MatchConfig, MatchError, MatchPhase, Orientation, Seat, COMPUTER_NAME,
    HUMAN_NAME,
};

fn attacked_cells(m: &Match, seat: Seat) -> usize {
    let state = m.player(seat).board().derived_state();
    state.ship_hit.len() + state.missed.len()
}

#[test]
fn test_new_match_is_in_setup() {
    let m = Match::with_seed(MatchConfig::default(), 1);
    assert_eq!(m.phase(), MatchPhase::Setup);
    assert!(!m.is_initialized());
    assert_eq!(m.current_turn(), Seat::Human);
    assert_eq!(m.winner(), None);
    assert_eq!(m.ship_lengths(), &[5, 4, 3, 3, 2]);
    assert_eq!(m.player(Seat::Human).name(), HUMAN_NAME);
    assert_eq!(m.player(Seat::Computer).name(), COMPUTER_NAME);
    assert_eq!(m.current_player().name(), HUMAN_NAME);
    assert_eq!(m.opponent().name(), COMPUTER_NAME);
    for seat in [Seat::Human, Seat::Computer] {
        assert_eq!(m.player(seat).board().ship_count(), 5);
        assert_eq!(m.player(seat).board().size(), 10);
    }
}

#[test]
fn test_start_requires_full_fleet() {
    let mut m = Match::with_seed(MatchConfig::new(vec![3, 2], 8), 2);
    m.clear_fleet().unwrap();
    assert!(!m.start());
    assert_eq!(m.phase(), MatchPhase::Setup);

    m.place_ship(3, (0, 0), Orientation::Horizontal).unwrap();
    assert!(!m.start());
    assert!(matches!(
        m.place_ship(2, (1, 0), Orientation::Vertical),
        Err(MatchError::Board(_))
    ));
    m.place_ship(2, (4, 4), Orientation::Vertical).unwrap();
    assert!(m.start());
    assert!(m.is_initialized());
    assert_eq!(m.phase(), MatchPhase::InProgress);
}

#[test]
fn test_fleet_locked_after_start() {
    let mut m = Match::with_seed(MatchConfig::default(), 3);
    assert!(m.start());
    assert_eq!(
        m.place_ship(1, (0, 0), Orientation::Horizontal),
        Err(MatchError::NotInSetup)
    );
    assert_eq!(m.remove_ship((0, 0)), Err(MatchError::NotInSetup));
    assert_eq!(m.rotate_ship((0, 0)), Err(MatchError::NotInSetup));
    assert_eq!(m.move_ship((0, 0), (5, 5)), Err(MatchError::NotInSetup));
    assert_eq!(m.clear_fleet(), Err(MatchError::NotInSetup));
    assert_eq!(m.randomize_fleet(), Err(MatchError::NotInSetup));
}

#[test]
fn test_setup_edits_reach_human_board() {
    let mut m = Match::with_seed(MatchConfig::default(), 4);
    assert_eq!(m.randomize_fleet(), Ok(true));
    assert_eq!(m.player(Seat::Human).board().ship_count(), 5);

    let origin = m.player(Seat::Human).board().ships().next().unwrap().origin();
    let removed = m.remove_ship(origin).unwrap().unwrap();
    assert_eq!(removed.origin, origin);
    assert_eq!(m.player(Seat::Human).board().ship_count(), 4);
    assert!(!m.start());
    assert_eq!(m.player(Seat::Computer).board().ship_count(), 5);
}

#[test]
fn test_attack_rejected_before_start() {
    let mut m = Match::with_seed(MatchConfig::default(), 5);
    assert_eq!(m.submit_attack((0, 0)), None);
    assert_eq!(attacked_cells(&m, Seat::Computer), 0);
}

#[test]
fn test_turn_round_trip() {
    let mut m = Match::with_seed(MatchConfig::default(), 6);
    assert!(m.start());
    let report = m.submit_attack((4, 4)).unwrap();
    assert_eq!(report.target, (4, 4));
    assert!(report.reply.is_some());
    assert_eq!(report.winner, None);
    assert_eq!(m.current_turn(), Seat::Human);
    assert_eq!(attacked_cells(&m, Seat::Human), 1);
    assert!(attacked_cells(&m, Seat::Computer) >= 1);

    // same cell again: rejected, and the computer does not move
    let before = attacked_cells(&m, Seat::Human);
    assert_eq!(m.submit_attack((4, 4)), None);
    assert_eq!(attacked_cells(&m, Seat::Human), before);
    assert_eq!(m.submit_attack((10, 10)), None);
}

#[test]
fn test_advance_turn_alternates() {
    let mut m = Match::with_seed(MatchConfig::default(), 7);
    m.advance_turn();
    assert_eq!(m.current_turn(), Seat::Computer);
    assert_eq!(m.current_player().name(), COMPUTER_NAME);
    m.advance_turn();
    assert_eq!(m.current_turn(), Seat::Human);
}

#[test]
fn test_attacks_wait_while_computer_holds_the_turn() {
    let mut m = Match::with_seed(MatchConfig::default(), 9);
    assert!(m.start());
    m.advance_turn();
    assert_eq!(m.current_turn(), Seat::Computer);
    assert_eq!(m.submit_attack((0, 0)), None);
    assert_eq!(attacked_cells(&m, Seat::Computer), 0);

    assert!(m.computer_turn().is_some());
    assert_eq!(attacked_cells(&m, Seat::Human), 1);
    assert_eq!(m.current_turn(), Seat::Human);
    assert_eq!(m.phase(), MatchPhase::InProgress);

    let report = m.submit_attack((0, 0)).unwrap();
    assert_eq!(report.target, (0, 0));
    assert_eq!(m.current_turn(), Seat::Human);
}

#[test]
fn test_direct_computer_turn_detects_win() {
    let mut m = Match::with_seed(MatchConfig::new(vec![1], 1), 3);
    assert!(m.start());
    m.advance_turn();
    assert_eq!(m.computer_turn(), Some(((0, 0), GuessResult::Sink)));
    assert!(m.player(Seat::Human).board().all_sunk());
    assert_eq!(m.winner(), Some(Seat::Computer));
    assert_eq!(m.phase(), MatchPhase::Finished);
    assert_eq!(m.current_turn(), Seat::Computer);
    assert_eq!(m.computer_turn(), None);
}

#[test]
fn test_human_wins_and_match_locks() {
    let mut m = Match::with_seed(MatchConfig::new(vec![1], 5), 8);
    assert!(m.start());
    let target = m.player(Seat::Computer).board().derived_state().ship_intact[0];
    let report = m.submit_attack(target).unwrap();
    assert_eq!(report.winner, Some(Seat::Human));
    assert_eq!(report.reply, None);
    assert_eq!(m.winner(), Some(Seat::Human));
    assert_eq!(m.phase(), MatchPhase::Finished);
    assert_eq!(attacked_cells(&m, Seat::Human), 0);

    let untouched = m.player(Seat::Computer).board().derived_state().untouched[0];
    assert_eq!(m.submit_attack(untouched), None);
    assert_eq!(m.computer_turn(), None);
    assert_eq!(m.winner(), Some(Seat::Human));
}

#[test]
fn test_computer_can_win() {
    let mut computer_wins = 0;
    for seed in 0..5 {
        let mut m = Match::with_seed(MatchConfig::new(vec![1], 10), seed);
        assert!(m.start());
        // the human only ever shoots at open water
        while m.phase() == MatchPhase::InProgress {
            let Some(&water) = m
                .player(Seat::Computer)
                .board()
                .derived_state()
                .untouched
                .first()
            else {
                break;
            };
            let report = m.submit_attack(water).unwrap();
            if report.winner == Some(Seat::Computer) {
                assert!(report.reply.is_some());
                assert!(m.player(Seat::Human).board().all_sunk());
                assert_eq!(m.current_turn(), Seat::Computer);
                computer_wins += 1;
            }
        }
    }
    assert!(computer_wins > 0);
}

#[test]
fn test_full_match_finishes() {
    let mut m = Match::with_seed(MatchConfig::default(), 42);
    assert!(m.start());
    let mut turns = 0;
    while m.phase() == MatchPhase::InProgress {
        let target = m.suggest_attack().unwrap();
        m.submit_attack(target).unwrap();
        turns += 1;
        assert!(turns <= 100, "game took too many turns");
    }
    let winner = m.winner().unwrap();
    assert!(m.player(winner.opponent()).board().all_sunk());
    assert!(!m.player(winner).board().all_sunk());
}

#[test]
fn test_restart_returns_to_setup() {
    let mut m = Match::with_seed(MatchConfig::new(vec![1], 5), 9);
    assert!(m.start());
    let target = m.player(Seat::Computer).board().derived_state().ship_intact[0];
    m.submit_attack(target).unwrap();
    assert_eq!(m.phase(), MatchPhase::Finished);

    m.restart();
    assert_eq!(m.phase(), MatchPhase::Setup);
    assert_eq!(m.winner(), None);
    assert_eq!(m.current_turn(), Seat::Human);
    for seat in [Seat::Human, Seat::Computer] {
        let state = m.player(seat).board().derived_state();
        assert_eq!(state.ship_intact.len(), 1);
        assert!(state.missed.is_empty());
    }
    assert!(m.start());
}

#[test]
fn test_config_validation() {
    use naval_duel::ConfigError;
    assert_eq!(MatchConfig::default().validate(), Ok(()));
    assert_eq!(
        MatchConfig::new(vec![2], 0).validate(),
        Err(ConfigError::ZeroBoardSize)
    );
    assert_eq!(
        MatchConfig::new(vec![], 10).validate(),
        Err(ConfigError::EmptyFleet)
    );
    assert_eq!(
        MatchConfig::new(vec![3, 0], 10).validate(),
        Err(ConfigError::ZeroLengthShip { index: 1 })
    );
}
