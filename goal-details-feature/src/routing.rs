/// Sheets the goal details screen can present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalDetailsSheet {
    EditGoal,
}

impl GoalDetailsSheet {
    pub fn title(&self) -> &'static str {
        match self {
            GoalDetailsSheet::EditGoal => "Edit Goal",
        }
    }
}

/// Which modal sheet, if any, the goal details screen presents
///
/// `show_modal_sheet` is only true while `current_modal_sheet` names a sheet;
/// the view model always changes both together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalDetailsRouting {
    pub current_modal_sheet: Option<GoalDetailsSheet>,
    pub show_modal_sheet: bool,
}

impl GoalDetailsRouting {
    /// The sheet to present right now
    pub fn presented_sheet(&self) -> Option<GoalDetailsSheet> {
        self.current_modal_sheet.filter(|_| self.show_modal_sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing_presents_nothing() {
        let routing = GoalDetailsRouting::default();
        assert_eq!(routing.current_modal_sheet, None);
        assert!(!routing.show_modal_sheet);
        assert_eq!(routing.presented_sheet(), None);
    }

    #[test]
    fn test_presented_sheet_requires_flag() {
        let mut routing = GoalDetailsRouting {
            current_modal_sheet: Some(GoalDetailsSheet::EditGoal),
            show_modal_sheet: false,
        };
        assert_eq!(routing.presented_sheet(), None);

        routing.show_modal_sheet = true;
        assert_eq!(routing.presented_sheet(), Some(GoalDetailsSheet::EditGoal));
    }
}
