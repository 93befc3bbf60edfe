//! # Add Goal View Model
//!
//! Holds everything the add-goal form edits and the form lifecycle.
//!
//! ## Lifecycle
//! ```text
//! Start --add_goal_action--> Loading --success--> Dismiss
//!                               |
//!                               +------failure----> Start (error_message set)
//! ```
//! `Dismiss` is terminal for a view model instance.
//!
//! The measure index and the date range are owned by the view until the user
//! submits; they arrive here as arguments of `add_goal_action`.

use chrono::NaiveDate;
use log::{error, info, warn};
use shared::{CreateGoalRequest, Goal, GoalMeasure, GoalMeasureOption, Published, SubscriptionId};
use std::fmt;
use std::sync::Arc;

use app_state::GoalService;

use crate::submission::{PendingSubmission, SubmissionPoll};

/// Which part of its lifecycle the add-goal form is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddGoalState {
    /// Editing; the submit button is available
    #[default]
    Start,
    /// A submission is in flight
    Loading,
    /// The goal was created and the screen should close
    Dismiss,
}

impl fmt::Display for AddGoalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddGoalState::Start => "start",
            AddGoalState::Loading => "loading",
            AddGoalState::Dismiss => "dismiss",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddGoalError {
    #[error("Measure index {index} is out of range ({count} options)")]
    InvalidMeasureIndex { index: usize, count: usize },
    #[error("{field} must be a number (got '{value}')")]
    InvalidAmount { field: &'static str, value: String },
    #[error("Cannot submit while the form is in the {0} state")]
    NotAccepting(AddGoalState),
}

pub struct AddGoalViewModel {
    /// Screen header
    pub title: Option<String>,

    name: Option<String>,
    goal: Option<String>,
    start: Option<String>,
    current: Option<String>,
    goal_measure_options: Vec<GoalMeasureOption>,

    state: Published<AddGoalState>,
    error_message: Option<String>,
    created_goal: Option<Goal>,

    visible: bool,
    service: Arc<dyn GoalService>,
    pending: Option<PendingSubmission>,
}

impl AddGoalViewModel {
    pub fn new(service: Arc<dyn GoalService>) -> Self {
        Self {
            title: None,
            name: None,
            goal: None,
            start: None,
            current: None,
            goal_measure_options: GoalMeasure::options(),
            state: Published::new(AddGoalState::Start),
            error_message: None,
            created_goal: None,
            visible: false,
            service,
            pending: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    // Field accessors. Setters always store `Some`, even for an empty string.

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = Some(value.into());
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    pub fn set_goal(&mut self, value: impl Into<String>) {
        self.goal = Some(value.into());
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn set_start(&mut self, value: impl Into<String>) {
        self.start = Some(value.into());
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn set_current(&mut self, value: impl Into<String>) {
        self.current = Some(value.into());
    }

    pub fn goal_measure_options(&self) -> &[GoalMeasureOption] {
        &self.goal_measure_options
    }

    pub fn state(&self) -> AddGoalState {
        *self.state.get()
    }

    pub fn subscribe_state(&mut self, listener: impl FnMut(&AddGoalState) + 'static) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe_state(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Message from the last rejected or failed submission
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The goal returned by a successful submission
    pub fn created_goal(&self) -> Option<&Goal> {
        self.created_goal.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn on_appear(&mut self) {
        info!("🎯 Add goal screen appeared");
        self.visible = true;
    }

    pub fn on_disappear(&mut self) {
        info!("🎯 Add goal screen disappeared");
        self.visible = false;
        if self.pending.is_some() {
            info!("Add goal screen hidden with a submission in flight; it applies on the next poll");
        }
    }

    /// Submit the form
    ///
    /// On success the form is `Loading` until `poll_submission` sees the
    /// service's answer. Rejected submissions leave the state untouched.
    pub fn add_goal_action(
        &mut self,
        measure_index: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(), AddGoalError> {
        let state = self.state();
        if state != AddGoalState::Start {
            warn!("Ignoring add goal action in the {} state", state);
            return Err(AddGoalError::NotAccepting(state));
        }

        let request = match self.build_request(measure_index, start_date, end_date) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected add goal action: {}", e);
                self.error_message = Some(e.to_string());
                return Err(e);
            }
        };

        info!("🎯 Submitting goal with measure {}", request.measure);
        self.error_message = None;
        self.pending = Some(PendingSubmission::spawn(Arc::clone(&self.service), request));
        self.state.set(AddGoalState::Loading);
        Ok(())
    }

    /// Apply a finished submission, if any; returns true when the state changed
    ///
    /// Called once per frame by the view.
    pub fn poll_submission(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };

        let outcome = match pending.try_recv() {
            SubmissionPoll::Pending => return false,
            SubmissionPoll::Finished(result) => result,
            SubmissionPoll::Lost => Err(anyhow::anyhow!("Goal submission was interrupted")),
        };
        self.pending = None;

        match outcome {
            Ok(response) => {
                info!("✅ {}", response.success_message);
                self.created_goal = Some(response.goal);
                self.state.set(AddGoalState::Dismiss);
            }
            Err(e) => {
                error!("Failed to create goal: {}", e);
                self.error_message = Some(format!("Failed to create goal: {}", e));
                self.state.set(AddGoalState::Start);
            }
        }
        true
    }

    fn build_request(
        &self,
        measure_index: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<CreateGoalRequest, AddGoalError> {
        let measure = self
            .goal_measure_options
            .get(measure_index)
            .map(|option| option.value)
            .ok_or(AddGoalError::InvalidMeasureIndex {
                index: measure_index,
                count: self.goal_measure_options.len(),
            })?;

        Ok(CreateGoalRequest {
            name: self.name.clone(),
            measure,
            goal_amount: parse_amount("Goal", self.goal())?,
            start_amount: parse_amount("Start", self.start())?,
            current_amount: parse_amount("Current", self.current())?,
            start_date,
            end_date,
        })
    }
}

impl fmt::Debug for AddGoalViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddGoalViewModel")
            .field("title", &self.title)
            .field("name", &self.name)
            .field("goal", &self.goal)
            .field("start", &self.start)
            .field("current", &self.current)
            .field("state", self.state.get())
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

/// Blank text means "not given"; a comma is accepted as the decimal separator
fn parse_amount(field: &'static str, text: Option<&str>) -> Result<Option<f64>, AddGoalError> {
    let Some(trimmed) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .map(Some)
        .ok_or_else(|| AddGoalError::InvalidAmount {
            field,
            value: trimmed.to_string(),
        })
}
