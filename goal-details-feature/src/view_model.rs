use log::{error, info, warn};
use shared::{Goal, Published, SubscriptionId};
use std::fmt;
use std::sync::Arc;

use app_state::GoalService;

use crate::routing::{GoalDetailsRouting, GoalDetailsSheet};

/// State holder of the goal details screen
pub struct GoalDetailsViewModel {
    id: String,
    routing_state: Published<GoalDetailsRouting>,
    goal: Option<Goal>,
    error_message: Option<String>,
    service: Arc<dyn GoalService>,
}

impl GoalDetailsViewModel {
    pub fn new(id: impl Into<String>, service: Arc<dyn GoalService>) -> Self {
        Self {
            id: id.into(),
            routing_state: Published::default(),
            goal: None,
            error_message: None,
            service,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn routing_state(&self) -> GoalDetailsRouting {
        *self.routing_state.get()
    }

    pub fn subscribe_routing(&mut self, listener: impl FnMut(&GoalDetailsRouting) + 'static) -> SubscriptionId {
        self.routing_state.subscribe(listener)
    }

    pub fn unsubscribe_routing(&mut self, id: SubscriptionId) -> bool {
        self.routing_state.unsubscribe(id)
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Load the goal this screen shows
    pub fn on_appear(&mut self) {
        info!("📋 Loading goal details for {}", self.id);
        match self.service.get_goal(&self.id) {
            Ok(Some(goal)) => {
                self.goal = Some(goal);
                self.error_message = None;
            }
            Ok(None) => {
                warn!("Goal {} not found", self.id);
                self.goal = None;
                self.error_message = Some(format!("Goal {} not found", self.id));
            }
            Err(e) => {
                error!("Failed to load goal {}: {}", self.id, e);
                self.error_message = Some(format!("Failed to load goal: {}", e));
            }
        }
    }

    pub fn edit_goal_action(&mut self) {
        info!("✏️ Presenting edit sheet for goal {}", self.id);
        self.routing_state.update(|routing| {
            routing.current_modal_sheet = Some(GoalDetailsSheet::EditGoal);
            routing.show_modal_sheet = true;
        });
    }

    /// Close whatever sheet is presented
    pub fn dismiss_modal_sheet(&mut self) {
        self.routing_state.update(|routing| {
            routing.current_modal_sheet = None;
            routing.show_modal_sheet = false;
        });
    }
}

impl fmt::Debug for GoalDetailsViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalDetailsViewModel")
            .field("id", &self.id)
            .field("routing_state", self.routing_state.get())
            .field("goal", &self.goal)
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use app_state::InMemoryGoalStore;
    use chrono::NaiveDate;
    use shared::{CreateGoalRequest, CreateGoalResponse, GoalMeasure};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct BrokenService;

    impl GoalService for BrokenService {
        fn create_goal(&self, _request: CreateGoalRequest) -> anyhow::Result<CreateGoalResponse> {
            Err(anyhow!("offline"))
        }

        fn get_goal(&self, _goal_id: &str) -> anyhow::Result<Option<Goal>> {
            Err(anyhow!("offline"))
        }

        fn list_goals(&self) -> anyhow::Result<Vec<Goal>> {
            Err(anyhow!("offline"))
        }
    }

    fn store_with_goal() -> (InMemoryGoalStore, Goal) {
        let store = InMemoryGoalStore::new();
        let goal = store
            .create_goal(CreateGoalRequest {
                name: Some("Emergency fund".to_string()),
                measure: GoalMeasure::Money,
                goal_amount: Some(5000.0),
                start_amount: Some(500.0),
                current_amount: Some(1200.0),
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            })
            .expect("Failed to create goal")
            .goal;
        (store, goal)
    }

    #[test]
    fn test_new_view_model_has_no_sheet() {
        let view_model = GoalDetailsViewModel::new("goal::1", Arc::new(InMemoryGoalStore::new()));

        assert_eq!(view_model.id(), "goal::1");
        assert_eq!(view_model.routing_state(), GoalDetailsRouting::default());
    }

    #[test]
    fn test_edit_goal_action_presents_edit_sheet() {
        let mut view_model = GoalDetailsViewModel::new("goal::1", Arc::new(InMemoryGoalStore::new()));

        view_model.edit_goal_action();

        let routing = view_model.routing_state();
        assert!(routing.show_modal_sheet);
        assert_eq!(routing.current_modal_sheet, Some(GoalDetailsSheet::EditGoal));
    }

    #[test]
    fn test_edit_goal_action_is_idempotent() {
        let mut view_model = GoalDetailsViewModel::new("goal::1", Arc::new(InMemoryGoalStore::new()));
        let notifications = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notifications);
        view_model.subscribe_routing(move |routing| sink.borrow_mut().push(*routing));

        view_model.edit_goal_action();
        view_model.edit_goal_action();

        assert_eq!(view_model.routing_state().presented_sheet(), Some(GoalDetailsSheet::EditGoal));
        assert_eq!(notifications.borrow().len(), 1);
    }

    #[test]
    fn test_edit_goal_action_after_dismiss() {
        let mut view_model = GoalDetailsViewModel::new("goal::1", Arc::new(InMemoryGoalStore::new()));
        view_model.edit_goal_action();

        view_model.dismiss_modal_sheet();
        assert_eq!(view_model.routing_state(), GoalDetailsRouting::default());

        view_model.edit_goal_action();
        let routing = view_model.routing_state();
        assert!(routing.show_modal_sheet);
        assert_eq!(routing.current_modal_sheet, Some(GoalDetailsSheet::EditGoal));
    }

    #[test]
    fn test_on_appear_loads_goal() {
        let (store, goal) = store_with_goal();
        let mut view_model = GoalDetailsViewModel::new(goal.id.clone(), Arc::new(store));

        view_model.on_appear();

        assert_eq!(view_model.goal(), Some(&goal));
        assert!(view_model.error_message().is_none());
    }

    #[test]
    fn test_on_appear_reports_missing_goal() {
        let mut view_model = GoalDetailsViewModel::new("goal::missing", Arc::new(InMemoryGoalStore::new()));

        view_model.on_appear();

        assert!(view_model.goal().is_none());
        assert_eq!(view_model.error_message(), Some("Goal goal::missing not found"));
    }

    #[test]
    fn test_on_appear_reports_service_error() {
        let mut view_model = GoalDetailsViewModel::new("goal::1", Arc::new(BrokenService));

        view_model.on_appear();

        assert_eq!(view_model.error_message(), Some("Failed to load goal: offline"));
    }
}
