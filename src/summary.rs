use crate::error::SummaryError;
use crate::items::{Attribute, StatTarget};
use crate::model::{clamp_stat, Player, StatSheet};
use crate::profile::batting_rating;
use crate::state::{InningsData, MatchState};

pub const POTM_WICKET_WEIGHT: u32 = 25;
pub const POTM_WINNER_BONUS: u32 = 10;
pub const MATCH_ENERGY_COST: i32 = 25;
pub const PROMOTION_RATING: f64 = 75.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchOutcome {
    Win,
    Loss,
    Tie,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Performance {
    pub name: String,
    pub team_id: String,
    pub runs: u32,
    pub wickets: u32,
}

impl Performance {
    fn potm_score(&self, winning_team: Option<&str>) -> u32 {
        let bonus = if winning_team == Some(self.team_id.as_str()) {
            POTM_WINNER_BONUS
        } else {
            0
        };
        self.runs + self.wickets * POTM_WICKET_WEIGHT + bonus
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchSummary {
    pub player_team_name: String,
    pub opponent_name: String,
    pub outcome: MatchOutcome,
    pub result_message: String,
    pub player_runs: u32,
    pub player_wickets: u32,
    pub player_team_score: String,
    pub opponent_score: String,
    pub player_team_innings: InningsData,
    pub opponent_innings: InningsData,
    pub player_of_the_match: Option<String>,
    pub player_is_potm: bool,
}

fn score_string(innings: &InningsData) -> String {
    format!("{}/{}", innings.total_score, innings.wickets)
}

/// Every batting and bowling figure from both innings, one row per
/// (team, name), in card order.
pub fn performances(
    first: &InningsData,
    second: &InningsData,
    team_ids: [&str; 2],
) -> Vec<Performance> {
    let mut rows: Vec<Performance> = Vec::new();
    let fielding_team = |innings: &InningsData| {
        if innings.batting_team_id == team_ids[0] {
            team_ids[1].to_string()
        } else {
            team_ids[0].to_string()
        }
    };
    let row_for = |rows: &mut Vec<Performance>, name: &str, team_id: &str| -> usize {
        if let Some(idx) = rows
            .iter()
            .position(|r| r.name == name && r.team_id == team_id)
        {
            return idx;
        }
        rows.push(Performance {
            name: name.to_string(),
            team_id: team_id.to_string(),
            runs: 0,
            wickets: 0,
        });
        rows.len() - 1
    };

    for innings in [first, second] {
        for entry in &innings.batting_card {
            let idx = row_for(&mut rows, &entry.player_name, &innings.batting_team_id);
            rows[idx].runs += entry.runs;
        }
    }
    for innings in [first, second] {
        let team_id = fielding_team(innings);
        for entry in &innings.bowling_card {
            let idx = row_for(&mut rows, &entry.player_name, &team_id);
            rows[idx].wickets += entry.wickets;
        }
    }
    rows
}

/// First strictly-highest score wins.
pub fn player_of_the_match<'a>(
    rows: &'a [Performance],
    winning_team: Option<&str>,
) -> Option<&'a Performance> {
    let mut best: Option<(&'a Performance, u32)> = None;
    for row in rows {
        let score = row.potm_score(winning_team);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((row, score)),
        }
    }
    best.map(|(row, _)| row)
}

impl MatchSummary {
    pub fn from_final_state(state: &MatchState, player: &Player) -> Result<Self, SummaryError> {
        if !state.match_over {
            return Err(SummaryError::MatchInProgress);
        }
        let first = state
            .innings1_data
            .clone()
            .ok_or(SummaryError::MissingFirstInnings)?;
        let second = state.snapshot_innings();

        let result_message = state.result_message.clone().unwrap_or_default();
        let player_team = &state.player_team;
        let outcome = if result_message.starts_with(&format!("{} won", player_team.name)) {
            MatchOutcome::Win
        } else if result_message.starts_with(&format!("{} won", state.opponent_team.name)) {
            MatchOutcome::Loss
        } else {
            MatchOutcome::Tie
        };
        let winning_team = match outcome {
            MatchOutcome::Win => Some(player_team.id.as_str()),
            MatchOutcome::Loss => Some(state.opponent_team.id.as_str()),
            MatchOutcome::Tie => None,
        };

        let team_ids = [player_team.id.as_str(), state.opponent_team.id.as_str()];
        let rows = performances(&first, &second, team_ids);
        let own = rows
            .iter()
            .find(|r| r.team_id == player_team.id && r.name == player.name);
        let player_runs = own.map_or(0, |r| r.runs);
        let player_wickets = own.map_or(0, |r| r.wickets);

        let potm = player_of_the_match(&rows, winning_team);
        let player_is_potm =
            potm.is_some_and(|r| r.team_id == player_team.id && r.name == player.name);
        let player_of_the_match = potm.map(|r| r.name.clone());

        let (player_team_innings, opponent_innings) = if first.batting_team_id == player_team.id {
            (first, second)
        } else {
            (second, first)
        };

        Ok(Self {
            player_team_name: player_team.name.clone(),
            opponent_name: state.opponent_team.name.clone(),
            outcome,
            result_message,
            player_runs,
            player_wickets,
            player_team_score: score_string(&player_team_innings),
            opponent_score: score_string(&opponent_innings),
            player_team_innings,
            opponent_innings,
            player_of_the_match,
            player_is_potm,
        })
    }
}

/// Match fee plus performance bonuses. Uses reputation before the match.
pub fn match_earnings(reputation: u8, runs: u32, wickets: u32, potm: bool) -> u32 {
    let mut earnings = 1500 + reputation as u32 * 20;
    if runs >= 100 {
        earnings += 500;
    } else if runs >= 50 {
        earnings += 200;
    }
    if wickets >= 5 {
        earnings += 400;
    } else if wickets >= 3 {
        earnings += 250;
    }
    if potm {
        earnings += 1000;
    }
    earnings
}

#[derive(Clone, Debug, PartialEq)]
pub struct CareerUpdate {
    pub player: Player,
    /// Headline for the newest milestone reached, if any.
    pub milestone: Option<String>,
}

fn add_reputation(player: &mut Player, delta: i32) {
    player.reputation = clamp_stat(player.reputation as i32 + delta);
}

/// Records career milestones not yet reached. Returns the last headline.
pub fn check_milestones(player: &mut Player) -> Option<String> {
    let mut headline = None;
    if player.career.runs >= 1000 && player.milestones.insert("1000_RUNS") {
        add_reputation(player, 5);
        headline = Some("Reached 1000 career runs!".to_string());
    }
    if player.career.wickets >= 50 && player.milestones.insert("50_WICKETS") {
        add_reputation(player, 5);
        headline = Some("Took 50 career wickets!".to_string());
    }
    if player.career.matches >= 50 && player.milestones.insert("50_MATCHES") {
        add_reputation(player, 10);
        headline = Some("Played 50 professional matches!".to_string());
    }
    let position = player.batting_position;
    if batting_rating(player) > PROMOTION_RATING
        && position > 1
        && !player.milestones.contains(&format!("promo_{}", position - 1))
    {
        player.batting_position = position - 1;
        player.milestones.insert(format!("promo_{}", position - 1));
        headline = Some(format!(
            "Promoted to #{} in the batting order!",
            player.batting_position
        ));
    }
    headline
}

impl Player {
    /// Folds a finished match into a new player value. `self` is untouched.
    pub fn after_match(&self, summary: &MatchSummary) -> CareerUpdate {
        let mut next = self.clone();
        let runs = summary.player_runs;
        let wickets = summary.player_wickets;

        let win_bonus = match summary.outcome {
            MatchOutcome::Win => 5,
            MatchOutcome::Loss => -5,
            MatchOutcome::Tie => 0,
        };
        let team_bonus = match summary.outcome {
            MatchOutcome::Win => 7,
            MatchOutcome::Loss => -3,
            MatchOutcome::Tie => 0,
        };
        let performance_bonus = (runs as f64 / 10.0 + wickets as f64 * 5.0 - 2.0).floor() as i32;
        let mood = win_bonus + performance_bonus;
        next.stats
            .add_clamped(StatTarget::Attribute(Attribute::PlayerHappiness), mood);
        next.stats
            .add_clamped(StatTarget::Attribute(Attribute::ManagerHappiness), mood);
        next.stats
            .add_clamped(StatTarget::Attribute(Attribute::TeamHappiness), team_bonus);

        next.career.runs += runs;
        next.career.wickets += wickets;
        next.career.matches += 1;
        next.season.runs += runs;
        next.season.wickets += wickets;
        next.finance += match_earnings(self.reputation, runs, wickets, summary.player_is_potm);
        next.energy = clamp_stat(self.energy as i32 - MATCH_ENERGY_COST);
        if summary.player_is_potm {
            next.career.potm_awards += 1;
            add_reputation(&mut next, 5);
        }

        let milestone = check_milestones(&mut next)
            .or_else(|| summary.player_is_potm.then(|| "Player of the Match!".to_string()));
        log::info!(
            "{} after match: {} runs, {} wickets, finance {}",
            next.name,
            runs,
            wickets,
            next.finance
        );
        CareerUpdate {
            player: next,
            milestone,
        }
    }
}

/// Plain-text batting and bowling card for one innings.
pub fn render_scorecard(innings: &InningsData, team_name: &str) -> String {
    let mut out = format!(
        "{team_name} {}/{} ({} ov)\n",
        innings.total_score, innings.wickets, innings.overs
    );
    out.push_str(&format!("{:<20} {:>4} {:>4}\n", "Batsman", "R", "B"));
    for entry in &innings.batting_card {
        let status = if entry.is_out {
            ""
        } else if entry.balls > 0 {
            " *"
        } else {
            continue;
        };
        out.push_str(&format!(
            "{:<20} {:>4} {:>4}{status}\n",
            entry.player_name, entry.runs, entry.balls
        ));
    }
    out.push_str(&format!(
        "{:<20} {:>4} {:>4} {:>4}\n",
        "Bowler", "O", "R", "W"
    ));
    for entry in &innings.bowling_card {
        out.push_str(&format!(
            "{:<20} {:>4} {:>4} {:>4}\n",
            entry.player_name,
            entry.overs.to_string(),
            entry.runs,
            entry.wickets
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BattingEntry, BowlingEntry, Overs};

    #[test]
    fn scorecard_lists_batsmen_who_batted() {
        let mut opener = BattingEntry::new("A. Jones", 1);
        opener.runs = 54;
        opener.balls = 38;
        opener.is_out = true;
        let mut partner = BattingEntry::new("B. Smith", 2);
        partner.runs = 12;
        partner.balls = 9;
        let mut bowler = BowlingEntry::new("H. Ali");
        bowler.overs = Overs::new(3, 2).unwrap();
        bowler.runs = 21;
        bowler.wickets = 1;
        let innings = InningsData {
            batting_team_id: "home".into(),
            batting_card: vec![opener, partner, BattingEntry::new("C. Patel", 3)],
            bowling_card: vec![bowler],
            total_score: 66,
            wickets: 1,
            overs: Overs::new(7, 5).unwrap(),
        };

        let card = render_scorecard(&innings, "Home XI");
        let lines: Vec<&str> = card.lines().collect();

        assert_eq!(lines[0], "Home XI 66/1 (7.5 ov)");
        assert_eq!(lines.len(), 6);
        assert!(lines[2].starts_with("A. Jones") && !lines[2].ends_with('*'));
        assert!(lines[3].starts_with("B. Smith") && lines[3].ends_with(" *"));
        assert!(!card.contains("C. Patel"));
        assert!(lines[5].starts_with("H. Ali") && lines[5].contains("3.2"));
        assert!(card.ends_with('\n'));
    }
}
