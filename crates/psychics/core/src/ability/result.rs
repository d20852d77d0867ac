use std::fmt;

use super::Ability;

/// Outcome of a cast-eligibility check.
///
/// These are control-flow values, not errors: a failed cast simply reports
/// why it did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TestResult {
    Success,
    FailedLevel,
    FailedDisabled,
    FailedCooldown,
    FailedCost,
    FailedTarget,
    FailedChannel,
    /// The trigger action is not bound to this ability. Never shown to players.
    FailedAction,
}

impl TestResult {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Player-facing explanation, parameterized by the ability's concept.
    pub fn message(self, ability: &Ability) -> Option<String> {
        let concept = ability.concept();
        let message = match self {
            Self::Success => "Success".to_owned(),
            Self::FailedLevel => format!("Level too low: requires {}", concept.level_requirement),
            Self::FailedDisabled => "Abilities are disabled right now".to_owned(),
            Self::FailedCooldown => "Not ready yet".to_owned(),
            Self::FailedCost => format!("Not enough mana: costs {}", format_decimal(concept.cost)),
            Self::FailedTarget => "No target in range".to_owned(),
            Self::FailedChannel => "Already channeling".to_owned(),
            Self::FailedAction => return None,
        };
        Some(message)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::FailedLevel => "failed: level",
            Self::FailedDisabled => "failed: disabled",
            Self::FailedCooldown => "failed: cooldown",
            Self::FailedCost => "failed: cost",
            Self::FailedTarget => "failed: target",
            Self::FailedChannel => "failed: channel",
            Self::FailedAction => "failed: action",
        };
        f.write_str(label)
    }
}

/// Formats with at most two decimals and no trailing zeros (`12`, `2.5`, `0.33`).
pub fn format_decimal(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
