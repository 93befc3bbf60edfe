//! # My Finance App
//!
//! The eframe shell that hosts the goal screens.
//!
//! ## Layout:
//! - Left panel: goals held by the goal service and a "New Goal" button
//! - Central panel: `GoalDetailsView` of the selected goal
//! - Window: `AddGoalView` while the user is adding a goal
//!
//! The add-goal screen is dismissed through the callback handed to its view;
//! the shell notices the request after the frame's rendering, closes the
//! window, refreshes the list and selects the new goal.
//!
//! A window closed while its goal is still being submitted keeps its view
//! alive in the background until the submission finishes; the list is then
//! refreshed so the goal shows up anyway.

use eframe::egui;
use log::{error, info};
use std::cell::Cell;
use std::rc::Rc;

use add_goal_feature::{AddGoalView, AddGoalViewModel};
use app_state::AppState;
use goal_details_feature::{GoalDetailsView, GoalDetailsViewModel};
use shared::Goal;

use crate::config::AppConfig;

pub struct MyFinanceApp {
    state: AppState,
    config: AppConfig,
    goals: Vec<Goal>,
    error_message: Option<String>,
    details: Option<GoalDetailsView>,
    add_goal: Option<AddGoalView>,
    add_goal_dismissed: Rc<Cell<bool>>,
    /// Closed add-goal views whose submission has not finished yet
    background_submissions: Vec<AddGoalView>,
}

impl MyFinanceApp {
    pub fn new(state: AppState, config: AppConfig) -> Self {
        info!("🚀 Initializing My Finance app");
        let mut app = Self {
            state,
            config,
            goals: Vec::new(),
            error_message: None,
            details: None,
            add_goal: None,
            add_goal_dismissed: Rc::new(Cell::new(false)),
            background_submissions: Vec::new(),
        };
        app.refresh_goals();
        app
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn selected_goal_id(&self) -> Option<&str> {
        self.details.as_ref().map(|view| view.view_model().id())
    }

    pub fn add_goal_view(&self) -> Option<&AddGoalView> {
        self.add_goal.as_ref()
    }

    pub fn add_goal_view_mut(&mut self) -> Option<&mut AddGoalView> {
        self.add_goal.as_mut()
    }

    pub fn refresh_goals(&mut self) {
        match self.state.goal_service.list_goals() {
            Ok(goals) => {
                info!("📊 Loaded {} goals", goals.len());
                self.goals = goals;
                self.error_message = None;
            }
            Err(e) => {
                error!("Failed to load goals: {}", e);
                self.error_message = Some(format!("Failed to load goals: {}", e));
            }
        }
    }

    pub fn select_goal(&mut self, goal_id: &str) {
        if self.selected_goal_id() == Some(goal_id) {
            return;
        }
        let view_model = GoalDetailsViewModel::new(goal_id, self.state.goal_service.clone());
        self.details = Some(GoalDetailsView::new(view_model));
    }

    /// Open the add-goal window; does nothing if it is already open
    pub fn present_add_goal(&mut self) {
        if self.add_goal.is_some() {
            return;
        }
        // Fresh flag per window so a background submission cannot close a newer window
        self.add_goal_dismissed = Rc::new(Cell::new(false));
        let dismissed = Rc::clone(&self.add_goal_dismissed);
        let view_model = AddGoalViewModel::new(self.state.goal_service.clone())
            .with_title(self.config.add_goal_title.clone());
        self.add_goal = Some(AddGoalView::new(view_model, move || dismissed.set(true)));
    }

    /// Close the add-goal window without waiting for a submission
    pub fn close_add_goal(&mut self) {
        if let Some(mut view) = self.add_goal.take() {
            view.on_disappear();
            if view.view_model().is_submitting() {
                info!("Add goal window closed mid-submission; finishing in the background");
                self.background_submissions.push(view);
            }
        }
    }

    pub fn has_background_submissions(&self) -> bool {
        !self.background_submissions.is_empty()
    }

    fn poll_background_submissions(&mut self) {
        if self.background_submissions.is_empty() {
            return;
        }

        let mut finished = false;
        self.background_submissions.retain_mut(|view| {
            let view_model = view.view_model_mut();
            finished |= view_model.poll_submission();
            view_model.is_submitting()
        });

        if finished {
            self.refresh_goals();
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        self.poll_background_submissions();
        if self.has_background_submissions() {
            ctx.request_repaint();
        }
        self.goals_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.details.as_mut() {
            Some(details) => details.show(ui),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("Select a goal or create a new one");
                });
            }
        });

        self.add_goal_window(ctx);
        self.handle_add_goal_dismissal();
    }

    fn goals_panel(&mut self, ctx: &egui::Context) {
        let mut clicked_goal = None;
        let mut new_goal_clicked = false;

        egui::SidePanel::left("goals_panel").min_width(220.0).show(ctx, |ui| {
            ui.heading("Goals");
            ui.separator();

            if let Some(message) = &self.error_message {
                ui.colored_label(egui::Color32::RED, format!("❌ {}", message));
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                if self.goals.is_empty() {
                    ui.label(egui::RichText::new("No goals yet").color(egui::Color32::GRAY));
                }
                let selected = self.selected_goal_id();
                for goal in &self.goals {
                    let is_selected = selected == Some(goal.id.as_str());
                    if ui.selectable_label(is_selected, goal.display_name()).clicked() {
                        clicked_goal = Some(goal.id.clone());
                    }
                }
            });

            ui.separator();
            new_goal_clicked = ui.button("➕ New Goal").clicked();
        });

        if let Some(goal_id) = clicked_goal {
            self.select_goal(&goal_id);
        }
        if new_goal_clicked {
            self.present_add_goal();
        }
    }

    fn add_goal_window(&mut self, ctx: &egui::Context) {
        let Some(view) = self.add_goal.as_mut() else {
            return;
        };

        let mut open = true;
        let title = view.view_model().title.clone().unwrap_or_default();
        egui::Window::new(title)
            .id(egui::Id::new("add_goal_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| view.show(ui));

        if !open {
            info!("Add goal window closed by the user");
            self.close_add_goal();
        }
    }

    fn handle_add_goal_dismissal(&mut self) {
        if !self.add_goal_dismissed.replace(false) {
            return;
        }

        let created_id = self
            .add_goal
            .as_ref()
            .and_then(|view| view.view_model().created_goal())
            .map(|goal| goal.id.clone());
        self.close_add_goal();
        self.refresh_goals();
        if let Some(goal_id) = created_id {
            self.select_goal(&goal_id);
        }
    }
}

impl eframe::App for MyFinanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use add_goal_feature::{AddGoalState, TextField};
    use app_state::{GoalService, InMemoryGoalStore};
    use chrono::NaiveDate;
    use shared::{CreateGoalRequest, GoalMeasure};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    fn app_with_store() -> (MyFinanceApp, InMemoryGoalStore) {
        let store = InMemoryGoalStore::new();
        let app = MyFinanceApp::new(AppState::new(Arc::new(store.clone())), AppConfig::default());
        (app, store)
    }

    fn frame(app: &mut MyFinanceApp) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
    }

    #[test]
    fn test_new_app_lists_existing_goals() {
        let store = InMemoryGoalStore::new();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        store
            .create_goal(CreateGoalRequest {
                name: Some("Car".to_string()),
                measure: GoalMeasure::Money,
                goal_amount: Some(8000.0),
                start_amount: None,
                current_amount: None,
                start_date: today,
                end_date: today,
            })
            .unwrap();

        let app = MyFinanceApp::new(AppState::new(Arc::new(store)), AppConfig::default());

        assert_eq!(app.goals().len(), 1);
        assert_eq!(app.goals()[0].name, "Car");
        assert!(app.selected_goal_id().is_none());
    }

    #[test]
    fn test_add_goal_flow_closes_window_and_selects_goal() {
        let (mut app, store) = app_with_store();
        app.present_add_goal();
        frame(&mut app);

        let view = app.add_goal_view_mut().expect("add goal window should be open");
        assert_eq!(view.view_model().title.as_deref(), Some("New Goal"));
        view.write_text(TextField::Name, "Vacation");
        view.write_text(TextField::Goal, "1000");
        view.select_measure(1);
        view.submit();
        assert_eq!(view.view_model().state(), AddGoalState::Loading);

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.add_goal_view().is_some() {
            assert!(Instant::now() < deadline, "add goal window never closed");
            frame(&mut app);
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(store.len(), 1);
        assert_eq!(app.goals().len(), 1);
        assert_eq!(app.selected_goal_id(), Some(app.goals()[0].id.as_str()));
    }

    #[test]
    fn test_present_add_goal_twice_keeps_one_window() {
        let (mut app, _store) = app_with_store();
        app.present_add_goal();
        app.add_goal_view_mut().unwrap().write_text(TextField::Name, "Keep me");

        app.present_add_goal();

        assert_eq!(app.add_goal_view().unwrap().text(TextField::Name), "Keep me");
    }

    #[test]
    fn test_close_add_goal_without_submitting() {
        let (mut app, store) = app_with_store();
        app.present_add_goal();
        frame(&mut app);

        app.close_add_goal();
        frame(&mut app);

        assert!(app.add_goal_view().is_none());
        assert!(store.is_empty());
        assert!(app.selected_goal_id().is_none());
    }

    #[test]
    fn test_goal_submitted_from_closed_window_appears_in_list() {
        let store = InMemoryGoalStore::new().with_latency(Duration::from_millis(50));
        let mut app = MyFinanceApp::new(AppState::new(Arc::new(store.clone())), AppConfig::default());
        app.present_add_goal();
        frame(&mut app);

        let view = app.add_goal_view_mut().unwrap();
        view.write_text(TextField::Name, "Closed early");
        view.submit();
        app.close_add_goal();
        assert!(app.add_goal_view().is_none());
        assert!(app.has_background_submissions());

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.goals().is_empty() {
            assert!(Instant::now() < deadline, "goal never showed up in the list");
            frame(&mut app);
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(app.goals()[0].name, "Closed early");
        assert!(!app.has_background_submissions());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_background_submission_leaves_new_window_open() {
        let store = InMemoryGoalStore::new().with_latency(Duration::from_millis(50));
        let mut app = MyFinanceApp::new(AppState::new(Arc::new(store.clone())), AppConfig::default());
        app.present_add_goal();
        app.add_goal_view_mut().unwrap().submit();
        app.close_add_goal();

        app.present_add_goal();
        app.add_goal_view_mut().unwrap().write_text(TextField::Name, "Second");

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.has_background_submissions() {
            assert!(Instant::now() < deadline, "background submission never finished");
            frame(&mut app);
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(app.goals().len(), 1);
        assert_eq!(app.add_goal_view().unwrap().text(TextField::Name), "Second");
    }
}
