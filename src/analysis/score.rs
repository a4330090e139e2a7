//! Health score
//!
//! Starts at 100 and is clamped to `0..=100`:
//!
//! | input                        | points |
//! |------------------------------|--------|
//! | error diagnostic             | -15    |
//! | warning diagnostic           | -5     |
//! | high priority recommendation | -10    |
//! | medium priority recommendation | -5   |
//! | each of environment, release, beforeSend present | +5 |
//!
//! Info diagnostics and low priority recommendations are free.

pub const BASE: i64 = 100;
pub const ERROR_PENALTY: i64 = 15;
pub const WARNING_PENALTY: i64 = 5;
pub const HIGH_PENALTY: i64 = 10;
pub const MEDIUM_PENALTY: i64 = 5;
pub const PRESENCE_BONUS: i64 = 5;

/// Options that earn a bonus when present
pub const BONUS_OPTIONS: &[&str] = &["environment", "release", "beforeSend"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreInputs {
    pub errors: usize,
    pub warnings: usize,
    pub high: usize,
    pub medium: usize,
    /// How many of [`BONUS_OPTIONS`] are present
    pub bonuses: usize,
}

pub fn compute(inputs: &ScoreInputs) -> u8 {
    let penalty = ERROR_PENALTY * inputs.errors as i64
        + WARNING_PENALTY * inputs.warnings as i64
        + HIGH_PENALTY * inputs.high as i64
        + MEDIUM_PENALTY * inputs.medium as i64;
    let bonus = PRESENCE_BONUS * inputs.bonuses.min(BONUS_OPTIONS.len()) as i64;
    (BASE - penalty + bonus).clamp(0, 100) as u8
}

pub fn summarize(errors: usize, warnings: usize, score: u8) -> String {
    match (errors, warnings) {
        (0, 0) => format!("Configuration looks good with no errors or warnings (score {}/100).", score),
        (0, w) => format!("Configuration has {} to review (score {}/100).", plural(w, "warning"), score),
        (e, w) => format!(
            "Configuration has {} and {} (score {}/100).",
            plural(e, "error"),
            plural(w, "warning"),
            score
        ),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
