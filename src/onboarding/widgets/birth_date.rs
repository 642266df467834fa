//! Birth date input: year, month and day as separate numeric fields.

use crate::onboarding::model::{BirthDate, BirthDateField};

use super::SubmitIntent;

/// Result of typing into one of the sub-fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthDateEdit {
    /// The whole date after sanitising the edited sub-field.
    pub value: BirthDate,
    /// Set when the edited sub-field filled up and focus jumped forward.
    pub focus_moved_to: Option<BirthDateField>,
}

#[derive(Debug, Clone)]
pub struct BirthDateInput {
    value: BirthDate,
    focus: BirthDateField,
}

impl BirthDateInput {
    pub fn new(value: BirthDate) -> Self {
        Self {
            value,
            focus: BirthDateField::Year,
        }
    }

    pub fn value(&self) -> &BirthDate {
        &self.value
    }

    /// Sub-field that currently has keyboard focus.
    pub fn focus(&self) -> BirthDateField {
        self.focus
    }

    pub fn set_focus(&mut self, field: BirthDateField) {
        self.focus = field;
    }

    /// Replace the contents of `field` with `raw`, keeping only its digits.
    ///
    /// Reaching the maximum length in year or month moves focus to the next
    /// sub-field.
    pub fn edit(&mut self, field: BirthDateField, raw: &str) -> BirthDateEdit {
        let digits = sanitize(field, raw);
        let full = digits.len() == field.max_len();
        self.value = self.value.with(field, digits);
        self.focus = field;

        let focus_moved_to = if full { field.next() } else { None };
        if let Some(next) = focus_moved_to {
            self.focus = next;
        }

        BirthDateEdit {
            value: self.value.clone(),
            focus_moved_to,
        }
    }

    /// Enter only submits from the day field.
    pub fn key_enter(&self) -> Option<SubmitIntent> {
        (self.focus == BirthDateField::Day).then_some(SubmitIntent)
    }
}

/// Strip non-digits and truncate to the sub-field's maximum length.
pub fn sanitize(field: BirthDateField, raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(field.max_len())
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn sanitize_strips_and_truncates() {
        assert_eq!(sanitize(BirthDateField::Year, "19a9-0x"), "1990");
        assert_eq!(sanitize(BirthDateField::Year, "199012"), "1990");
        assert_eq!(sanitize(BirthDateField::Month, " 1 2 3"), "12");
        assert_eq!(sanitize(BirthDateField::Day, "abc"), "");
        assert_eq!(sanitize(BirthDateField::Day, "٣"), "");
    }

    #[test]
    fn sanitized_values_are_digits_within_limit() {
        let mut rng = StdRng::seed_from_u64(7);
        let alphabet: Vec<char> = "0123456789 abc-/.٣７é".chars().collect();
        for _ in 0..500 {
            let len = rng.gen_range(0..12);
            let raw: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            for field in [BirthDateField::Year, BirthDateField::Month, BirthDateField::Day] {
                let mut input = BirthDateInput::new(BirthDate::default());
                let edit = input.edit(field, &raw);
                let stored = edit.value.get(field);
                assert!(stored.len() <= field.max_len(), "{raw:?} -> {stored:?}");
                assert!(stored.chars().all(|c| c.is_ascii_digit()), "{raw:?} -> {stored:?}");
            }
        }
    }

    #[test]
    fn focus_moves_when_field_fills() {
        let mut input = BirthDateInput::new(BirthDate::default());

        let edit = input.edit(BirthDateField::Year, "199");
        assert_eq!(edit.focus_moved_to, None);
        assert_eq!(input.focus(), BirthDateField::Year);

        let edit = input.edit(BirthDateField::Year, "1990");
        assert_eq!(edit.focus_moved_to, Some(BirthDateField::Month));
        assert_eq!(input.focus(), BirthDateField::Month);

        let edit = input.edit(BirthDateField::Month, "04");
        assert_eq!(edit.focus_moved_to, Some(BirthDateField::Day));

        let edit = input.edit(BirthDateField::Day, "15");
        assert_eq!(edit.focus_moved_to, None);
        assert_eq!(input.focus(), BirthDateField::Day);
        assert_eq!(
            edit.value,
            BirthDate {
                year: "1990".into(),
                month: "04".into(),
                day: "15".into(),
            }
        );
    }

    #[test]
    fn enter_submits_only_from_day() {
        let mut input = BirthDateInput::new(BirthDate::default());
        assert_eq!(input.key_enter(), None);
        input.set_focus(BirthDateField::Month);
        assert_eq!(input.key_enter(), None);
        input.set_focus(BirthDateField::Day);
        assert_eq!(input.key_enter(), Some(SubmitIntent));
    }

    #[test]
    fn editing_one_field_keeps_the_others() {
        let mut input = BirthDateInput::new(BirthDate {
            year: "2000".into(),
            month: "1".into(),
            day: "2".into(),
        });
        let edit = input.edit(BirthDateField::Month, "11");
        assert_eq!(edit.value.year, "2000");
        assert_eq!(edit.value.month, "11");
        assert_eq!(edit.value.day, "2");
    }
}
