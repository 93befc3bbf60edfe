//! # Add Goal Feature
//!
//! The add-goal screen: `AddGoalViewModel` holds the editable draft and the
//! form lifecycle, `AddGoalView` renders it with egui and closes itself once
//! the goal has been submitted.

mod submission;
mod view;
mod view_model;

pub use view::{ActionSection, AddGoalView, TextField};
pub use view_model::{AddGoalError, AddGoalState, AddGoalViewModel};
