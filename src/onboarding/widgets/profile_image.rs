//! Profile image input: a circular preview that opens an action sheet.
//!
//! Picking a file starts an asynchronous decode. Every decode carries a
//! [`DecodeTicket`]; only the ticket issued last is ever applied, so a slow
//! decode of an earlier pick cannot overwrite a newer choice.

use std::path::Path;

use crate::error::PreviewError;
use crate::onboarding::model::ProfileImage;
use crate::onboarding::prompts::IMAGE_CAPTION;

/// What the circle currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Untouched: the "add a picture" graphic.
    Placeholder,
    /// The stock avatar, after "use default image".
    Default,
    /// A decoded picture from the device.
    Picked(ProfileImage),
}

/// Entries of the action sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOption {
    SelectFromDevice,
    UseDefault,
    Close,
}

/// What the host has to do after a sheet choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    /// No change.
    Nothing,
    /// Open the platform file picker.
    PickFile,
    /// The default image was chosen; report `None` upward.
    UseDefault,
}

/// Identifies one decode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecodeTicket(u64);

impl DecodeTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct ProfileImageInput {
    preview: Preview,
    sheet_open: bool,
    chosen: bool,
    issued: u64,
    pending: Option<DecodeTicket>,
}

impl Default for ProfileImageInput {
    fn default() -> Self {
        Self {
            preview: Preview::Placeholder,
            sheet_open: false,
            chosen: false,
            issued: 0,
            pending: None,
        }
    }
}

impl ProfileImageInput {
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn is_sheet_open(&self) -> bool {
        self.sheet_open
    }

    pub fn has_chosen(&self) -> bool {
        self.chosen
    }

    /// A decode is in flight.
    pub fn is_decoding(&self) -> bool {
        self.pending.is_some()
    }

    pub fn caption(&self) -> Option<&'static str> {
        self.chosen.then_some(IMAGE_CAPTION)
    }

    /// Clicking the circle opens the sheet.
    pub fn open_sheet(&mut self) {
        self.sheet_open = true;
    }

    /// Handle a sheet entry. Choices made while the sheet is closed do nothing.
    pub fn choose(&mut self, option: SheetOption) -> ImageAction {
        if !self.sheet_open {
            return ImageAction::Nothing;
        }
        self.sheet_open = false;

        match option {
            SheetOption::SelectFromDevice => ImageAction::PickFile,
            SheetOption::UseDefault => {
                // Any decode still running belongs to an older choice.
                self.pending = None;
                self.preview = Preview::Default;
                self.chosen = true;
                ImageAction::UseDefault
            }
            SheetOption::Close => ImageAction::Nothing,
        }
    }

    /// Register a freshly picked file and issue its ticket.
    pub fn begin_decode(&mut self, path: &Path) -> DecodeTicket {
        self.issued += 1;
        let ticket = DecodeTicket(self.issued);
        self.pending = Some(ticket);
        tracing::debug!(ticket = ticket.0, path = %path.display(), "Profile image decode started");
        ticket
    }

    /// Apply a finished decode.
    ///
    /// Returns the image to report upward, or `None` when the ticket is stale
    /// or the decode failed. Neither of those changes the widget.
    pub fn finish_decode(
        &mut self,
        ticket: DecodeTicket,
        result: Result<ProfileImage, PreviewError>,
    ) -> Option<ProfileImage> {
        if self.pending != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "Discarding stale profile image decode");
            return None;
        }
        self.pending = None;

        match result {
            Ok(image) => {
                self.preview = Preview::Picked(image.clone());
                self.chosen = true;
                Some(image)
            }
            Err(e) => {
                tracing::warn!("Profile image could not be decoded: {}", e);
                None
            }
        }
    }
}
