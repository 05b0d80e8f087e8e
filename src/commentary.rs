use crate::state::{Overs, PitchCondition, TossDecision, Weather};
use serde::{Deserialize, Serialize};

/// Append-only ball-by-ball log. Lines are never edited or removed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commentary {
    lines: Vec<String>,
}

impl Commentary {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// `over` is the over count before the ball was bowled.
    pub fn log_ball(&mut self, over: Overs, text: &str) {
        self.lines
            .push(format!("{}.{}: {text}", over.completed(), over.balls() + 1));
    }

    pub fn log_toss(&mut self, winner: &str, decision: TossDecision) {
        self.lines
            .push(format!("{winner} won the toss and chose to {decision}."));
    }

    pub fn log_conditions(&mut self, weather: Weather, pitch: PitchCondition) {
        self.lines
            .push(format!("Conditions: {weather} weather on a {pitch} pitch."));
    }

    pub fn log_end_of_over(&mut self) {
        self.lines.push("--- End of Over ---".to_string());
    }

    pub fn log_new_bowler(&mut self, bowler: &str) {
        self.lines.push(format!("{bowler} comes into the attack."));
    }

    pub fn log_end_of_innings(&mut self, target: u32) {
        self.lines.push("--- End of Innings ---".to_string());
        self.lines.push(format!("Target is {target}"));
    }

    pub fn log_result(&mut self, result: &str) {
        self.lines.push(result.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub const PRESSURE_PREFIX: &str = "The pressure is mounting... ";

pub fn wicket_text(batsman: &str, bowler: &str) -> String {
    format!("OUT! A brilliant delivery from {bowler}, {batsman} is gone!")
}

pub fn dot_text(bowler: &str) -> String {
    format!("Dot ball. Excellent pressure from {bowler}.")
}

pub fn single_text(batsman: &str) -> String {
    format!("A quick single taken by {batsman}.")
}

pub fn two_text() -> String {
    "Good running, they come back for a second.".to_string()
}

pub fn gap_text(runs: u32) -> String {
    if runs == 3 {
        "They push it into the gap and pick up three quick runs!".to_string()
    } else {
        "They push it into the gap and pick up a single.".to_string()
    }
}

pub fn four_text(batsman: &str) -> String {
    format!("FOUR! That's a glorious shot from {batsman}!")
}

pub fn six_text(batsman: &str) -> String {
    format!("SIX! It's out of the park! What a hit by {batsman}!")
}

pub fn fifty_text(batsman: &str) -> String {
    format!(" FIFTY! A brilliant half-century for {batsman}. The crowd rises to applaud.")
}

pub fn century_text(batsman: &str) -> String {
    format!(" CENTURY! What a magnificent innings from {batsman}! A hundred to remember.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ball_entry_uses_next_ball_number() {
        let mut log = Commentary::new();
        log.log_ball(Overs::new(3, 5).unwrap(), "Dot ball.");
        log.log_ball(Overs::whole(4), "FOUR!");
        assert_eq!(log.lines(), ["3.6: Dot ball.", "4.1: FOUR!"]);
    }

    #[test]
    fn innings_break_adds_two_lines() {
        let mut log = Commentary::new();
        log.log_end_of_innings(151);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some("Target is 151"));
    }
}
