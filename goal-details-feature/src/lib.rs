//! # Goal Details Feature
//!
//! Shows one goal and routes to the sheets opened from it.

mod routing;
mod view;
mod view_model;

pub use routing::{GoalDetailsRouting, GoalDetailsSheet};
pub use view::GoalDetailsView;
pub use view_model::GoalDetailsViewModel;
