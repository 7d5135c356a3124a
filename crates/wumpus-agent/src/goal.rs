use core::fmt;

use serde::{Deserialize, Serialize};

/// High-level objective the strategic planner compiles into actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Goal {
    #[default]
    ExploreSafely,
    ReturnHome,
    GetUnstuck,
    Escape,
}

impl Goal {
    /// Fallback order when the agent has no plan and no gold.
    pub const TIERS: [Goal; 3] = [Goal::ExploreSafely, Goal::GetUnstuck, Goal::Escape];

    pub fn as_str(self) -> &'static str {
        match self {
            Goal::ExploreSafely => "explore_safely",
            Goal::ReturnHome => "return_home",
            Goal::GetUnstuck => "get_unstuck",
            Goal::Escape => "escape",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
