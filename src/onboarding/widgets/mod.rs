//! Step input widgets.
//!
//! Each widget is a small state object owned by the orchestrator. It accepts
//! raw user input, keeps whatever display state it needs (focus, inline
//! error, action sheet), and reports the resulting value back. Text-entry
//! widgets also report a [`SubmitIntent`] when Enter is pressed in their last
//! field, so the orchestrator can try to advance without a button press.

pub mod birth_date;
pub mod profile_image;
pub mod selector;
pub mod text_input;

pub use birth_date::{BirthDateEdit, BirthDateInput};
pub use profile_image::{DecodeTicket, ImageAction, Preview, ProfileImageInput, SheetOption};
pub use selector::{OptionSelector, OptionView};
pub use text_input::{TextInput, TextInputKind};

/// The user pressed Enter where the widget treats it as "try to advance".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct SubmitIntent;
