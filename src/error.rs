use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("team '{team}' has strength {strength}, expected 1..=100")]
    StrengthOutOfRange { team: String, strength: u8 },

    #[error("both sides share team id '{0}'")]
    DuplicateTeamId(String),

    #[error("batting position {0} is outside 1..=11")]
    BattingPositionOutOfRange(u8),

    #[error("player name must not be empty")]
    EmptyPlayerName,

    #[error("toss winner '{0}' is not playing in this match")]
    UnknownTossWinner(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("match is still in progress")]
    MatchInProgress,

    #[error("first innings was never recorded")]
    MissingFirstInnings,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("event '{event}' has no choice {choice}")]
    ChoiceOutOfRange { event: String, choice: usize },

    #[error("unknown equipment '{0}'")]
    UnknownItem(String),

    #[error("cannot afford '{item}': costs {cost}, have {funds}")]
    InsufficientFunds { item: String, cost: u32, funds: u32 },

    #[error("not enough energy: needs {needed}, have {available}")]
    InsufficientEnergy { needed: u8, available: u8 },
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum OversParseError {
    #[error("overs value {0} is negative or not finite")]
    Invalid(f64),

    #[error("overs value {0} has ball digit above 5")]
    BallOutOfRange(f64),
}
