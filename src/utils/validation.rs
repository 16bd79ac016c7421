//! Write-boundary checks. Everything that reaches the database or the scoring
//! engine has already passed through here, so neither needs to coerce input.

use thiserror::Error;

use crate::scoring::points::ScoreLine;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_TEAM_NAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_VENUE_LEN: usize = 100;
pub const MAX_SETTING_KEY_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Score must not be negative, got {0}")]
    NegativeScore(i32),
    #[error("Score {score} exceeds the maximum of {max} goals")]
    ScoreTooHigh { score: i32, max: u32 },
    #[error("Gameweek must be between 1 and {max}, got {value}")]
    GameweekOutOfRange { value: i32, max: u8 },
    #[error("Fixture {fixture_id} belongs to gameweek {actual}, not {expected}")]
    GameweekMismatch { fixture_id: i32, expected: i32, actual: i32 },
    #[error("Duplicate entry for fixture {0}")]
    DuplicateFixture(i32),
    #[error("Username must be between 3 and 50 characters")]
    UsernameLength,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Email must be at most 100 characters")]
    EmailTooLong,
    #[error("Role must be 'user' or 'admin', got '{0}'")]
    UnknownRole(String),
    #[error("Team names must be non-empty, at most 50 characters and different")]
    InvalidTeams,
    #[error("Venue must be at most 100 characters")]
    VenueTooLong,
    #[error("Setting key must not be empty")]
    EmptySettingKey,
    #[error("Setting key must be at most 100 characters")]
    SettingKeyTooLong,
}

/// Validate one goal count against `0..=max_goals`.
pub fn validate_goals(goals: i32, max_goals: u32) -> Result<u32, ValidationError> {
    let goals_u = u32::try_from(goals).map_err(|_| ValidationError::NegativeScore(goals))?;
    if goals_u > max_goals {
        return Err(ValidationError::ScoreTooHigh { score: goals, max: max_goals });
    }
    Ok(goals_u)
}

pub fn validate_score_line(home: i32, away: i32, max_goals: u32) -> Result<ScoreLine, ValidationError> {
    Ok(ScoreLine::new(
        validate_goals(home, max_goals)?,
        validate_goals(away, max_goals)?,
    ))
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.trim().chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(ValidationError::UsernameLength);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Shape check only: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::EmailTooLong);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

pub fn validate_teams(home_team: &str, away_team: &str) -> Result<(), ValidationError> {
    let home = home_team.trim();
    let away = away_team.trim();
    if home.is_empty()
        || away.is_empty()
        || home.chars().count() > MAX_TEAM_NAME_LEN
        || away.chars().count() > MAX_TEAM_NAME_LEN
        || home.eq_ignore_ascii_case(away)
    {
        return Err(ValidationError::InvalidTeams);
    }
    Ok(())
}

pub fn validate_venue(venue: Option<&str>) -> Result<(), ValidationError> {
    match venue {
        Some(venue) if venue.chars().count() > MAX_VENUE_LEN => Err(ValidationError::VenueTooLong),
        _ => Ok(()),
    }
}

pub fn validate_setting_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::EmptySettingKey);
    }
    if key.chars().count() > MAX_SETTING_KEY_LEN {
        return Err(ValidationError::SettingKeyTooLong);
    }
    Ok(())
}
