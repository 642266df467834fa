//! Single-select option list used for language, gender and visit purpose.

use serde::Serialize;

use crate::onboarding::model::Choice;

/// One rendered option button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub id: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Exclusive choice among `T::ALL`. Selecting commits immediately.
#[derive(Debug, Clone)]
pub struct OptionSelector<T: Choice> {
    selected: Option<T>,
}

impl<T: Choice> Default for OptionSelector<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T: Choice> OptionSelector<T> {
    /// Start with an optional pre-seeded selection.
    pub fn new(selected: Option<T>) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> Option<T> {
        self.selected
    }

    /// Select `choice`. Returns `true` if the selection changed.
    pub fn select(&mut self, choice: T) -> bool {
        let changed = self.selected != Some(choice);
        self.selected = Some(choice);
        changed
    }

    pub fn options(&self) -> Vec<OptionView> {
        T::ALL
            .iter()
            .map(|c| OptionView {
                id: c.id(),
                label: c.label(),
                selected: self.selected == Some(*c),
            })
            .collect()
    }
}
