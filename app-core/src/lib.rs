//! # App Core
//!
//! Umbrella crate of the My Finance app. It pulls in every feature crate and
//! re-exports them so the host only depends on this one crate:
//!
//! - `shared` - goal DTOs and the `Published` observable value
//! - `app_state` - application-wide services (`GoalService`)
//! - `add_goal` - the add-goal screen
//! - `goal_details` - the goal details screen
//!
//! The desktop shell (`MyFinanceApp`) and its configuration live here too.

pub mod app;
pub mod config;

pub use add_goal_feature as add_goal;
pub use app_state;
pub use goal_details_feature as goal_details;
pub use shared;

pub use app::MyFinanceApp;
pub use config::{AppConfig, ConfigError, WindowConfig};
