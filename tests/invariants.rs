use cricket_career_sim::action::{BallInput, Tactic};
use cricket_career_sim::autoplay::{human_to_act, simulate_player_over};
use cricket_career_sim::engine::resolve_ball;
use cricket_career_sim::model::{Player, PlayerRole, Team};
use cricket_career_sim::setup::{start_match, MatchSetup};
use cricket_career_sim::state::{MatchState, Overs, MAX_OVERS, MAX_WICKETS};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn make_setup(home: u8, away: u8, tactic: Tactic) -> MatchSetup {
    MatchSetup::new(
        Team {
            id: "home".to_string(),
            name: "Home XI".to_string(),
            strength: home,
        },
        Team {
            id: "away".to_string(),
            name: "Away XI".to_string(),
            strength: away,
        },
        tactic,
    )
}

fn check_state(state: &MatchState) -> Result<(), TestCaseError> {
    prop_assert!(state.wickets <= MAX_WICKETS);
    prop_assert!(state.overs <= Overs::whole(MAX_OVERS));
    prop_assert!(state.overs.balls() < 6);
    let batted: u32 = state.batting_order.iter().map(|b| b.runs).sum();
    let conceded: u32 = state.bowling_order.iter().map(|b| b.runs).sum();
    prop_assert_eq!(batted, state.score);
    prop_assert_eq!(conceded, state.score);
    let bowled: u32 = state
        .bowling_order
        .iter()
        .map(|b| b.overs.total_balls())
        .sum();
    prop_assert_eq!(bowled, state.overs.total_balls());
    let at_crease = state.at_crease();
    prop_assert!(at_crease.len() <= 2);
    if !state.match_over && state.innings_complete() {
        prop_assert!(false, "innings complete but lifecycle did not move on");
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_every_ball_keeps_invariants(
        seed in any::<u64>(),
        home in 1u8..=100,
        away in 1u8..=100,
        position in 1u8..=11,
        tactic_idx in 0usize..3,
    ) {
        let player = Player::builder("P. Layer")
            .role(PlayerRole::AllRounder)
            .batting_position(position)
            .build();
        let setup = make_setup(home, away, Tactic::ALL[tactic_idx]);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = start_match(&player, &setup, &mut rng).unwrap();

        let mut balls = 0usize;
        while !state.match_over {
            let commentary_before = state.commentary.len();
            let ball = resolve_ball(&mut state, &player, &BallInput::Simulate, &mut rng);
            prop_assert!(ball.is_some());
            prop_assert!(state.commentary.len() > commentary_before);
            check_state(&state)?;
            balls += 1;
            prop_assert!(balls <= 2 * 6 * MAX_OVERS as usize);
        }
        prop_assert!(state.result_message.is_some());
        prop_assert!(state.innings1_data.is_some());
    }

    #[test]
    fn prop_player_overs_end_the_match(seed in any::<u64>(), tactic_idx in 0usize..3) {
        let player = Player::builder("P. Layer")
            .role(PlayerRole::Bowler)
            .batting_position(9)
            .build();
        let setup = make_setup(60, 60, Tactic::ALL[tactic_idx]);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = start_match(&player, &setup, &mut rng).unwrap();

        for _ in 0..(2 * MAX_OVERS + 1) {
            if state.match_over {
                break;
            }
            let _ = human_to_act(&state, &player);
            simulate_player_over(&mut state, &player, &mut rng);
            check_state(&state)?;
        }
        prop_assert!(state.match_over);
    }

    #[test]
    fn prop_overs_add_ball_counts_deliveries(deliveries in 0u32..400) {
        let mut overs = Overs::ZERO;
        let mut completed = 0;
        for _ in 0..deliveries {
            if overs.add_ball() {
                completed += 1;
            }
        }
        prop_assert_eq!(overs.total_balls(), deliveries);
        prop_assert_eq!(overs.completed(), completed);
        prop_assert_eq!(overs.completed(), deliveries / 6);
    }
}
