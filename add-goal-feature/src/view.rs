//! # Add Goal View
//!
//! egui renderer for the add-goal form.
//!
//! ## Sections:
//! - Money: name, measure picker, goal/start/current amounts
//! - Dates: start and end date pickers
//! - Action: submit button, spinner or nothing, depending on the form state
//!
//! Text fields write through to the view model. The measure index and the two
//! dates stay local to the view and are only handed over on submit.

use chrono::NaiveDate;
use log::{info, warn};

use crate::view_model::{AddGoalState, AddGoalViewModel};

/// What the bottom of the form shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSection {
    AddButton,
    Loading,
    Hidden,
}

impl ActionSection {
    pub fn for_state(state: AddGoalState) -> Self {
        match state {
            AddGoalState::Start => ActionSection::AddButton,
            AddGoalState::Loading => ActionSection::Loading,
            AddGoalState::Dismiss => ActionSection::Hidden,
        }
    }
}

/// Text inputs of the money section, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Goal,
    Start,
    Current,
}

impl TextField {
    pub const ALL: [TextField; 4] = [TextField::Name, TextField::Goal, TextField::Start, TextField::Current];

    pub fn label(&self) -> &'static str {
        match self {
            TextField::Name => "Name",
            TextField::Goal => "Goal",
            TextField::Start => "Start",
            TextField::Current => "Current",
        }
    }

    fn is_amount(&self) -> bool {
        !matches!(self, TextField::Name)
    }
}

pub struct AddGoalView {
    view_model: AddGoalViewModel,
    goal_measure_index: usize,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl AddGoalView {
    /// `dismiss` runs once, when the form reaches `AddGoalState::Dismiss`
    pub fn new(mut view_model: AddGoalViewModel, dismiss: impl FnMut() + 'static) -> Self {
        let mut dismiss = dismiss;
        view_model.subscribe_state(move |state| {
            if *state == AddGoalState::Dismiss {
                info!("🎯 Goal added, dismissing add goal screen");
                dismiss();
            }
        });

        let today = chrono::Local::now().date_naive();
        Self {
            view_model,
            goal_measure_index: 0,
            start_date: today,
            end_date: today,
        }
    }

    pub fn view_model(&self) -> &AddGoalViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut AddGoalViewModel {
        &mut self.view_model
    }

    /// Text shown in a field; unset fields show as empty
    pub fn text(&self, field: TextField) -> String {
        let value = match field {
            TextField::Name => self.view_model.name(),
            TextField::Goal => self.view_model.goal(),
            TextField::Start => self.view_model.start(),
            TextField::Current => self.view_model.current(),
        };
        value.unwrap_or_default().to_owned()
    }

    pub fn write_text(&mut self, field: TextField, value: impl Into<String>) {
        match field {
            TextField::Name => self.view_model.set_name(value),
            TextField::Goal => self.view_model.set_goal(value),
            TextField::Start => self.view_model.set_start(value),
            TextField::Current => self.view_model.set_current(value),
        }
    }

    pub fn goal_measure_index(&self) -> usize {
        self.goal_measure_index
    }

    pub fn select_measure(&mut self, index: usize) {
        self.goal_measure_index = index;
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = date;
    }

    pub fn action_section(&self) -> ActionSection {
        ActionSection::for_state(self.view_model.state())
    }

    /// The "Add" button's action
    pub fn submit(&mut self) {
        if let Err(e) = self
            .view_model
            .add_goal_action(self.goal_measure_index, self.start_date, self.end_date)
        {
            warn!("Add goal submission rejected: {}", e);
        }
    }

    pub fn on_disappear(&mut self) {
        self.view_model.on_disappear();
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if !self.view_model.is_visible() {
            self.view_model.on_appear();
        }
        self.view_model.poll_submission();

        ui.heading(self.view_model.title.as_deref().unwrap_or(""));
        ui.separator();

        self.money_section(ui);
        ui.add_space(10.0);
        self.date_section(ui);
        ui.add_space(10.0);

        if let Some(message) = self.view_model.error_message() {
            ui.colored_label(egui::Color32::RED, format!("❌ {}", message));
            ui.add_space(5.0);
        }

        self.action_section_ui(ui);
    }

    fn money_section(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("add_goal_money_section")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for field in TextField::ALL {
                    ui.label(field.label());
                    let mut text = self.text(field);
                    let hint = if field.is_amount() { "0.00" } else { field.label() };
                    let response = ui.add(egui::TextEdit::singleline(&mut text).hint_text(hint));
                    if response.changed() {
                        self.write_text(field, text);
                    }
                    ui.end_row();

                    if field == TextField::Name {
                        self.measure_picker(ui);
                        ui.end_row();
                    }
                }
            });
    }

    fn measure_picker(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Measure").color(egui::Color32::GRAY));

        let options = self.view_model.goal_measure_options();
        let selected = options
            .get(self.goal_measure_index)
            .map(|option| option.name.clone())
            .unwrap_or_default();

        egui::ComboBox::from_id_source("add_goal_measure")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for (index, option) in options.iter().enumerate() {
                    ui.selectable_value(&mut self.goal_measure_index, index, option.name.as_str());
                }
            });
    }

    fn date_section(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("add_goal_date_section")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Start Date");
                ui.add(egui_extras::DatePickerButton::new(&mut self.start_date).id_source("add_goal_start_date"));
                ui.end_row();

                ui.label("End Date");
                ui.add(egui_extras::DatePickerButton::new(&mut self.end_date).id_source("add_goal_end_date"));
                ui.end_row();
            });
    }

    fn action_section_ui(&mut self, ui: &mut egui::Ui) {
        match self.action_section() {
            ActionSection::AddButton => {
                let clicked = ui.vertical_centered(|ui| ui.button("Add").clicked()).inner;
                if clicked {
                    self.submit();
                }
            }
            ActionSection::Loading => {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                });
                ui.ctx().request_repaint();
            }
            ActionSection::Hidden => {}
        }
    }
}
