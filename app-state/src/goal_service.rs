use anyhow::Result;
use shared::{CreateGoalRequest, CreateGoalResponse, Goal};

/// Interface the goal screens use to create and look up goals
///
/// Implementations are called from background submission threads as well as
/// from the UI thread, hence `Send + Sync`.
pub trait GoalService: Send + Sync {
    /// Create a goal from a submitted form
    fn create_goal(&self, request: CreateGoalRequest) -> Result<CreateGoalResponse>;

    /// Retrieve a specific goal by ID
    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>>;

    /// List all goals, most recently created first
    fn list_goals(&self) -> Result<Vec<Goal>>;
}
