use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

mod observable;

pub use observable::{Published, SubscriptionId};

/// Unit a goal's amounts are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMeasure {
    /// Amounts are sums of money
    Money,
    /// Amounts are percentages
    Percent,
    /// Amounts are plain counts (shares, items, ...)
    Units,
}

impl GoalMeasure {
    /// Every measure, in the order the picker lists them
    pub const ALL: [GoalMeasure; 3] = [GoalMeasure::Money, GoalMeasure::Percent, GoalMeasure::Units];

    pub fn display_name(&self) -> &'static str {
        match self {
            GoalMeasure::Money => "Money",
            GoalMeasure::Percent => "Percent",
            GoalMeasure::Units => "Units",
        }
    }

    /// The fixed, ordered option list offered by goal forms
    pub fn options() -> Vec<GoalMeasureOption> {
        Self::ALL.iter().copied().map(GoalMeasureOption::from).collect()
    }
}

impl fmt::Display for GoalMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A named entry of the measure picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalMeasureOption {
    pub name: String,
    pub value: GoalMeasure,
}

impl From<GoalMeasure> for GoalMeasureOption {
    fn from(value: GoalMeasure) -> Self {
        Self {
            name: value.display_name().to_string(),
            value,
        }
    }
}

/// Goal ID in format: "goal::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    /// Name shown in lists and headers (may be empty)
    pub name: String,
    pub measure: GoalMeasure,
    /// Target amount to reach
    pub goal_amount: Option<f64>,
    /// Amount at the start of the goal period
    pub start_amount: Option<f64>,
    /// Amount reached so far
    pub current_amount: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Goal {
    pub fn generate_id() -> String {
        format!("goal::{}", uuid::Uuid::new_v4())
    }

    /// Name for display, falling back to a placeholder for unnamed goals
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Untitled goal"
        } else {
            &self.name
        }
    }
}

/// Payload built by the add-goal form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub name: Option<String>,
    pub measure: GoalMeasure,
    pub goal_amount: Option<f64>,
    pub start_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalResponse {
    pub goal: Goal,
    pub success_message: String,
}
