use std::cmp::Ordering;
use serde::{Deserialize, Serialize};

pub const EXACT_SCORE_POINTS: u32 = 5;
pub const CORRECT_RESULT_POINTS: u32 = 2;
pub const WRONG_PREDICTION_POINTS: u32 = 0;

/// A final or predicted score. Goal counts are non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreLine {
    pub home: u32,
    pub away: u32,
}

impl ScoreLine {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Build from stored columns. Returns `None` for negative values, which the
    /// table constraints should already have ruled out.
    pub fn from_stored(home: i32, away: i32) -> Option<Self> {
        Some(Self::new(u32::try_from(home).ok()?, u32::try_from(away).ok()?))
    }

    /// Column values for the `INTEGER` score columns.
    pub fn to_stored(&self) -> (i32, i32) {
        (
            i32::try_from(self.home).unwrap_or(i32::MAX),
            i32::try_from(self.away).unwrap_or(i32::MAX),
        )
    }

    pub fn outcome(&self) -> Outcome {
        match self.home.cmp(&self.away) {
            Ordering::Greater => Outcome::HomeWin,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::AwayWin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// How a single prediction fared against the actual result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Award {
    ExactScore,
    CorrectResult,
    Wrong,
}

impl Award {
    pub fn points(&self) -> u32 {
        match self {
            Award::ExactScore => EXACT_SCORE_POINTS,
            Award::CorrectResult => CORRECT_RESULT_POINTS,
            Award::Wrong => WRONG_PREDICTION_POINTS,
        }
    }
}

pub fn award(predicted: ScoreLine, actual: ScoreLine) -> Award {
    if predicted == actual {
        Award::ExactScore
    } else if predicted.outcome() == actual.outcome() {
        Award::CorrectResult
    } else {
        Award::Wrong
    }
}

/// Points for one prediction: 5 for the exact score, 2 for the right outcome, 0 otherwise.
pub fn score(predicted: ScoreLine, actual: ScoreLine) -> u32 {
    award(predicted, actual).points()
}
