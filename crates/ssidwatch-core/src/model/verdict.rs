// ── Condition verdict ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// Result code the host expects for a satisfied condition.
pub const RESULT_CONDITION_SATISFIED: i32 = 16;
/// Result code the host expects for an unsatisfied condition.
pub const RESULT_CONDITION_UNSATISFIED: i32 = 17;

/// Answer to "is this network currently visible or connected?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verdict {
    Satisfied,
    Unsatisfied,
}

impl Verdict {
    pub fn from_match(found: bool) -> Self {
        if found { Self::Satisfied } else { Self::Unsatisfied }
    }

    pub fn is_satisfied(self) -> bool {
        self == Self::Satisfied
    }

    /// The integer result code reported back to the host.
    pub fn result_code(self) -> i32 {
        match self {
            Self::Satisfied => RESULT_CONDITION_SATISFIED,
            Self::Unsatisfied => RESULT_CONDITION_UNSATISFIED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_codes_match_host_protocol() {
        assert_eq!(Verdict::Satisfied.result_code(), 16);
        assert_eq!(Verdict::Unsatisfied.result_code(), 17);
    }

    #[test]
    fn display_is_uppercase() {
        assert_eq!(Verdict::from_match(true).to_string(), "SATISFIED");
        assert_eq!(Verdict::from_match(false).to_string(), "UNSATISFIED");
    }
}
