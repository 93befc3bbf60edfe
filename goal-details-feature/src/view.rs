//! # Goal Details View
//!
//! Renders one goal with an "Edit" action. While the routing state names a
//! sheet, the sheet is shown as a window on top of the screen; closing the
//! window clears the routing state again.

use log::info;
use shared::Goal;

use crate::routing::GoalDetailsSheet;
use crate::view_model::GoalDetailsViewModel;

pub struct GoalDetailsView {
    view_model: GoalDetailsViewModel,
    appeared: bool,
}

impl GoalDetailsView {
    pub fn new(view_model: GoalDetailsViewModel) -> Self {
        Self {
            view_model,
            appeared: false,
        }
    }

    pub fn view_model(&self) -> &GoalDetailsViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut GoalDetailsViewModel {
        &mut self.view_model
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if !self.appeared {
            self.appeared = true;
            self.view_model.on_appear();
        }

        if let Some(message) = self.view_model.error_message() {
            ui.colored_label(egui::Color32::RED, format!("❌ {}", message));
            return;
        }

        let Some(goal) = self.view_model.goal() else {
            ui.spinner();
            return;
        };

        ui.heading(goal.display_name());
        ui.separator();
        goal_summary(ui, goal);
        ui.add_space(10.0);

        if ui.button("✏️ Edit").clicked() {
            self.view_model.edit_goal_action();
        }

        if let Some(sheet) = self.view_model.routing_state().presented_sheet() {
            self.sheet_window(ui.ctx(), sheet);
        }
    }

    fn sheet_window(&mut self, ctx: &egui::Context, sheet: GoalDetailsSheet) {
        let mut open = true;
        let mut close_clicked = false;

        egui::Window::new(sheet.title())
            .id(egui::Id::new(("goal_details_sheet", self.view_model.id())))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| match sheet {
                GoalDetailsSheet::EditGoal => {
                    if let Some(goal) = self.view_model.goal() {
                        goal_summary(ui, goal);
                    }
                    ui.add_space(10.0);
                    close_clicked = ui.button("Close").clicked();
                }
            });

        if !open || close_clicked {
            info!("Closing {} sheet", sheet.title());
            self.view_model.dismiss_modal_sheet();
        }
    }
}

fn goal_summary(ui: &mut egui::Ui, goal: &Goal) {
    egui::Grid::new(("goal_summary", goal.id.as_str()))
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            let rows = [
                ("Measure", goal.measure.to_string()),
                ("Goal", format_amount(goal.goal_amount)),
                ("Start", format_amount(goal.start_amount)),
                ("Current", format_amount(goal.current_amount)),
                ("Start Date", goal.start_date.format("%Y-%m-%d").to_string()),
                ("End Date", goal.end_date.format("%Y-%m-%d").to_string()),
            ];
            for (label, value) in rows {
                ui.label(egui::RichText::new(label).color(egui::Color32::GRAY));
                ui.label(value);
                ui.end_row();
            }
        });
}

fn format_amount(amount: Option<f64>) -> String {
    amount.map(|a| format!("{:.2}", a)).unwrap_or_else(|| "-".to_string())
}
