//! # In-memory goal store
//!
//! Process-local `GoalService` implementation. Goals live for as long as the
//! store (and its clones, which share the same list). An optional simulated
//! latency delays `create_goal` so the add-goal loading state can be seen in
//! the desktop app.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{debug, info};
use shared::{CreateGoalRequest, CreateGoalResponse, Goal};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use crate::GoalService;

#[derive(Clone, Default)]
pub struct InMemoryGoalStore {
    goals: Arc<RwLock<Vec<Goal>>>,
    latency: Duration,
}

impl InMemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every `create_goal` call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.goals.read().map(|goals| goals.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GoalService for InMemoryGoalStore {
    fn create_goal(&self, request: CreateGoalRequest) -> Result<CreateGoalResponse> {
        info!("Creating goal: {:?}", request);

        if !self.latency.is_zero() {
            debug!("Simulating {:?} of goal service latency", self.latency);
            thread::sleep(self.latency);
        }

        let goal = Goal {
            id: Goal::generate_id(),
            name: request.name.unwrap_or_default().trim().to_string(),
            measure: request.measure,
            goal_amount: request.goal_amount,
            start_amount: request.start_amount,
            current_amount: request.current_amount,
            start_date: request.start_date,
            end_date: request.end_date,
            created_at: Utc::now().to_rfc3339(),
        };

        self.goals
            .write()
            .map_err(|_| anyhow!("Goal store lock poisoned"))?
            .push(goal.clone());

        info!("Created goal {}", goal.id);
        Ok(CreateGoalResponse {
            success_message: format!("Goal '{}' created", goal.display_name()),
            goal,
        })
    }

    fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>> {
        let goals = self.goals.read().map_err(|_| anyhow!("Goal store lock poisoned"))?;
        Ok(goals.iter().find(|goal| goal.id == goal_id).cloned())
    }

    fn list_goals(&self) -> Result<Vec<Goal>> {
        let goals = self.goals.read().map_err(|_| anyhow!("Goal store lock poisoned"))?;
        Ok(goals.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::GoalMeasure;

    fn request(name: &str) -> CreateGoalRequest {
        CreateGoalRequest {
            name: Some(name.to_string()),
            measure: GoalMeasure::Money,
            goal_amount: Some(1000.0),
            start_amount: Some(0.0),
            current_amount: None,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        }
    }

    #[test]
    fn test_create_and_get_goal() {
        let store = InMemoryGoalStore::new();

        let response = store.create_goal(request("Vacation")).expect("Failed to create goal");
        assert_eq!(response.goal.name, "Vacation");
        assert_eq!(response.success_message, "Goal 'Vacation' created");

        let stored = store
            .get_goal(&response.goal.id)
            .expect("Failed to get goal")
            .expect("Goal should exist");
        assert_eq!(stored, response.goal);
        assert_eq!(stored.goal_amount, Some(1000.0));
        assert_eq!(stored.current_amount, None);
    }

    #[test]
    fn test_get_unknown_goal() {
        let store = InMemoryGoalStore::new();
        assert!(store.get_goal("goal::missing").unwrap().is_none());
    }

    #[test]
    fn test_list_goals_most_recent_first() {
        let store = InMemoryGoalStore::new();
        store.create_goal(request("First")).unwrap();
        store.create_goal(request("Second")).unwrap();

        let names: Vec<String> = store.list_goals().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Second", "First"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clones_share_goals() {
        let store = InMemoryGoalStore::new();
        let handle = store.clone();
        assert!(handle.is_empty());

        store.create_goal(request("Shared")).unwrap();

        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_unnamed_goal_keeps_empty_name() {
        let store = InMemoryGoalStore::new();
        let mut unnamed = request("");
        unnamed.name = None;

        let response = store.create_goal(unnamed).unwrap();

        assert_eq!(response.goal.name, "");
        assert_eq!(response.success_message, "Goal 'Untitled goal' created");
    }
}
