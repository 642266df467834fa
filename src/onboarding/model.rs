//! Onboarding answer model and the fixed option sets offered by the selectors.

use serde::{Deserialize, Serialize};

/// A fixed, enumerated set of options rendered as a single-select list.
pub trait Choice: Copy + Eq + Sized + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Stable identifier sent to the backend.
    fn id(&self) -> &'static str;

    /// Human-readable label shown on the option button.
    fn label(&self) -> &'static str;

    /// Look up an option by its identifier.
    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }
}

/// Interface language chosen on the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Korean,
    Chinese,
    Japanese,
    German,
    Spanish,
    Others,
}

impl Choice for Language {
    const ALL: &'static [Self] = &[
        Self::English,
        Self::Korean,
        Self::Chinese,
        Self::Japanese,
        Self::German,
        Self::Spanish,
        Self::Others,
    ];

    fn id(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Korean => "korean",
            Self::Chinese => "chinese",
            Self::Japanese => "japanese",
            Self::German => "german",
            Self::Spanish => "spanish",
            Self::Others => "others",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Korean => "한국어",
            Self::Chinese => "中文",
            Self::Japanese => "日本語",
            Self::German => "Deutsch",
            Self::Spanish => "Español",
            Self::Others => "Others",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Man,
    Woman,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Self::Man, Self::Woman];

    fn id(&self) -> &'static str {
        match self {
            Self::Man => "man",
            Self::Woman => "woman",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Man => "Man",
            Self::Woman => "Woman",
        }
    }
}

/// Why the user is visiting; drives which reports are offered later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitPurpose {
    General,
    Cancer,
    Orthopedics,
    Internal,
    Womens,
    Mental,
    Surgery,
    Other,
}

impl Choice for VisitPurpose {
    const ALL: &'static [Self] = &[
        Self::General,
        Self::Cancer,
        Self::Orthopedics,
        Self::Internal,
        Self::Womens,
        Self::Mental,
        Self::Surgery,
        Self::Other,
    ];

    fn id(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Cancer => "cancer",
            Self::Orthopedics => "orthopedics",
            Self::Internal => "internal",
            Self::Womens => "womens",
            Self::Mental => "mental",
            Self::Surgery => "surgery",
            Self::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::General => "General check-up",
            Self::Cancer => "Cancer care",
            Self::Orthopedics => "Orthopedics",
            Self::Internal => "Internal medicine",
            Self::Womens => "Women's health",
            Self::Mental => "Mental health",
            Self::Surgery => "Surgery / Procedure",
            Self::Other => "Other / Custom",
        }
    }
}

macro_rules! display_as_id {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.id())
                }
            }
        )*
    };
}

display_as_id!(Language, Gender, VisitPurpose);

/// One of the three birth-date sub-fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BirthDateField {
    Year,
    Month,
    Day,
}

impl BirthDateField {
    /// Maximum number of digits the sub-field holds.
    pub fn max_len(&self) -> usize {
        match self {
            Self::Year => 4,
            Self::Month | Self::Day => 2,
        }
    }

    /// The sub-field that receives focus once this one is full.
    pub fn next(&self) -> Option<BirthDateField> {
        match self {
            Self::Year => Some(Self::Month),
            Self::Month => Some(Self::Day),
            Self::Day => None,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Year => "YYYY",
            Self::Month => "MM",
            Self::Day => "DD",
        }
    }
}

/// Birth date as entered: three digit strings, not a calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl BirthDate {
    pub fn get(&self, field: BirthDateField) -> &str {
        match field {
            BirthDateField::Year => &self.year,
            BirthDateField::Month => &self.month,
            BirthDateField::Day => &self.day,
        }
    }

    /// Copy of this date with one sub-field replaced.
    pub fn with(&self, field: BirthDateField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            BirthDateField::Year => next.year = value,
            BirthDateField::Month => next.month = value,
            BirthDateField::Day => next.day = value,
        }
        next
    }
}

/// A profile picture read from the user's device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub file_name: String,
    pub media_type: String,
    #[serde(default, skip_serializing)]
    pub bytes: Vec<u8>,
}

/// Everything collected by the onboarding wizard.
///
/// Values are never mutated in place by the wizard; each change goes through
/// one of the `with_*` methods and yields a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub birth_date: BirthDate,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ProfileImage>,
    /// Set once the user picked a file or explicitly asked for the default
    /// image. `profile_image == None` with this flag set means "default".
    #[serde(default)]
    pub image_chosen: bool,
    #[serde(default)]
    pub visit_purpose: Option<VisitPurpose>,
}

impl OnboardingAnswers {
    pub fn with_language(&self, language: Language) -> Self {
        Self {
            language: Some(language),
            ..self.clone()
        }
    }

    pub fn with_phone(&self, phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..self.clone()
        }
    }

    pub fn with_nickname(&self, nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            ..self.clone()
        }
    }

    pub fn with_birth_date(&self, birth_date: BirthDate) -> Self {
        Self {
            birth_date,
            ..self.clone()
        }
    }

    pub fn with_gender(&self, gender: Gender) -> Self {
        Self {
            gender: Some(gender),
            ..self.clone()
        }
    }

    /// Record the profile image decision. `None` selects the default image.
    pub fn with_profile_image(&self, image: Option<ProfileImage>) -> Self {
        Self {
            profile_image: image,
            image_chosen: true,
            ..self.clone()
        }
    }

    pub fn with_visit_purpose(&self, purpose: VisitPurpose) -> Self {
        Self {
            visit_purpose: Some(purpose),
            ..self.clone()
        }
    }
}
