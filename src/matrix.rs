use crate::action::Tactic;
use crate::autoplay::play_out;
use crate::model::Player;
use crate::setup::{start_match, MatchSetup};
use crate::state::PitchCondition;
use crate::summary::{MatchOutcome, MatchSummary};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Plays one seeded match to the end from the player's point of view.
pub fn simulate_match(
    player: &Player,
    setup: &MatchSetup,
    seed: u64,
) -> anyhow::Result<MatchOutcome> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = start_match(player, setup, &mut rng)?;
    play_out(&mut state, player, &mut rng);
    let summary = MatchSummary::from_final_state(&state, player)?;
    Ok(summary.outcome)
}

/// Player-team win rate for every declared tactic (rows) on every pitch
/// (columns). Ties count as half a win. Toss and weather come from `base`
/// or are drawn per match.
pub fn compute_tactic_matrix(
    player: &Player,
    base: &MatchSetup,
    sims_per_cell: usize,
    seed: u64,
) -> anyhow::Result<Vec<Vec<f64>>> {
    let tasks: Vec<(usize, usize)> = (0..Tactic::ALL.len())
        .flat_map(|t| (0..PitchCondition::ALL.len()).map(move |p| (t, p)))
        .collect();
    let cell_results: Vec<CellResult> = tasks
        .par_iter()
        .map(|&(t_idx, p_idx)| -> anyhow::Result<CellResult> {
            let mut cell_rng =
                SmallRng::seed_from_u64(seed ^ ((t_idx as u64) << 32) ^ (p_idx as u64));
            let setup = MatchSetup {
                tactic: Tactic::ALL[t_idx],
                pitch: Some(PitchCondition::ALL[p_idx]),
                ..base.clone()
            };
            let mut wins = 0u64;
            let mut ties = 0u64;
            for _ in 0..sims_per_cell {
                let match_seed = cell_rng.gen();
                match simulate_match(player, &setup, match_seed)? {
                    MatchOutcome::Win => wins += 1,
                    MatchOutcome::Loss => {}
                    MatchOutcome::Tie => ties += 1,
                }
            }
            let total = sims_per_cell.max(1) as f64;
            Ok(CellResult {
                t_idx,
                p_idx,
                win_rate: (wins as f64 + 0.5 * ties as f64) / total,
            })
        })
        .collect::<anyhow::Result<_>>()?;

    let mut matrix = vec![vec![0.0; PitchCondition::ALL.len()]; Tactic::ALL.len()];
    for cell in cell_results {
        log::debug!(
            "{} on {}: {:.4}",
            Tactic::ALL[cell.t_idx].as_str(),
            PitchCondition::ALL[cell.p_idx],
            cell.win_rate
        );
        matrix[cell.t_idx][cell.p_idx] = cell.win_rate;
    }
    Ok(matrix)
}

pub fn write_csv(matrix: &[Vec<f64>], path: &std::path::Path) -> anyhow::Result<()> {
    let mut out = String::from("tactic");
    for pitch in PitchCondition::ALL {
        out.push(',');
        out.push_str(&pitch.to_string());
    }
    for (row_idx, row) in matrix.iter().enumerate() {
        out.push('\n');
        let label = Tactic::ALL.get(row_idx).map_or("?", |t| t.as_str());
        out.push_str(label);
        for value in row {
            out.push_str(&format!(",{value:.4}"));
        }
    }
    out.push('\n');
    std::fs::write(path, out)?;
    Ok(())
}

struct CellResult {
    t_idx: usize,
    p_idx: usize,
    win_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Team;

    fn base_setup() -> MatchSetup {
        MatchSetup::new(
            Team {
                id: "home".into(),
                name: "Home XI".into(),
                strength: 55,
            },
            Team {
                id: "away".into(),
                name: "Away XI".into(),
                strength: 55,
            },
            Tactic::Balanced,
        )
    }

    #[test]
    fn matrix_is_seeded_and_bounded() {
        let player = Player::builder("M. Atrix").build();
        let a = compute_tactic_matrix(&player, &base_setup(), 2, 11).unwrap();
        let b = compute_tactic_matrix(&player, &base_setup(), 2, 11).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), Tactic::ALL.len());
        for row in &a {
            assert_eq!(row.len(), PitchCondition::ALL.len());
            assert!(row.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn invalid_setup_surfaces_as_error() {
        let player = Player::builder("M. Atrix").batting_position(0).build();
        assert!(compute_tactic_matrix(&player, &base_setup(), 1, 0).is_err());
    }
}
