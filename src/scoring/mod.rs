pub mod points;
pub mod leaderboard;
pub mod stats;

use std::fmt;
use serde::Serialize;

use crate::utils::validation::ValidationError;

/// Number of rounds in a Premier League season.
pub const SEASON_GAMEWEEKS: u8 = 38;

/// A gameweek number guaranteed to lie within `1..=SEASON_GAMEWEEKS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Gameweek(u8);

impl Gameweek {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|gw| (1..=SEASON_GAMEWEEKS).contains(gw))
            .map(Gameweek)
            .ok_or(ValidationError::GameweekOutOfRange { value, max: SEASON_GAMEWEEKS })
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based slot in per-gameweek arrays.
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = Gameweek> {
        (1..=SEASON_GAMEWEEKS).map(Gameweek)
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GW{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gameweek_bounds() {
        assert!(Gameweek::new(0).is_err());
        assert!(Gameweek::new(39).is_err());
        assert!(Gameweek::new(-3).is_err());
        assert_eq!(Gameweek::new(1).map(|gw| gw.index()), Ok(0));
        assert_eq!(Gameweek::new(38).map(|gw| gw.index()), Ok(37));
        assert_eq!(Gameweek::all().count(), 38);
    }
}
