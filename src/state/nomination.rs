//! Candidate nomination wizard.
//!
//! DESIGN
//! ======
//! Raw input lives in [`NominationDraft`] so going back never loses typing.
//! [`NominationStep`] carries only what earlier steps validated, so the
//! review step renders typed data instead of re-reading loose form fields.

#[cfg(test)]
#[path = "nomination_test.rs"]
mod nomination_test;

use crate::util::validate::{ValidationError, validate_photo};

/// Positions open for nomination, as `(id, title)`.
pub const NOMINATION_POSITIONS: &[(&str, &str)] = &[
    ("1", "President"),
    ("2", "Vice President"),
    ("3", "Treasurer"),
    ("4", "Secretary"),
    ("5", "Events Coordinator"),
];

/// Number of wizard steps, review included.
pub const STEP_COUNT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NominationError {
    #[error("Please select a position")]
    MissingPosition,
    #[error("Please complete your profile information")]
    IncompleteProfile,
    #[error("Please provide your manifesto and goals")]
    IncompletePlatform,
    #[error("Please accept the terms and conditions")]
    TermsNotAccepted,
    #[error("the nomination is not ready for submission")]
    NotInReview,
}

/// Everything typed into the wizard so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NominationDraft {
    pub position_id: String,
    pub bio: String,
    pub experience: String,
    pub manifesto: String,
    pub goals: String,
    /// Preview URL of the chosen photo, if any.
    pub photo: Option<String>,
    pub terms_accepted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionChoice {
    pub position_id: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub bio: String,
    pub experience: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    pub manifesto: String,
    pub goals: String,
}

/// A nomination ready to submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nomination {
    pub position: PositionChoice,
    pub profile: Profile,
    pub platform: Platform,
    pub photo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NominationStep {
    #[default]
    Position,
    Profile { position: PositionChoice },
    Platform { position: PositionChoice, profile: Profile },
    Review { nomination: Nomination },
}

impl NominationStep {
    /// One-based step number shown in the progress header.
    pub fn number(&self) -> u8 {
        match self {
            Self::Position => 1,
            Self::Profile { .. } => 2,
            Self::Platform { .. } => 3,
            Self::Review { .. } => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Position => "Select Position",
            Self::Profile { .. } => "Your Profile",
            Self::Platform { .. } => "Manifesto & Goals",
            Self::Review { .. } => "Review & Submit",
        }
    }
}

fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NominationWizard {
    pub draft: NominationDraft,
    step: NominationStep,
}

impl NominationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &NominationStep {
        &self.step
    }

    pub fn progress_percent(&self) -> f64 {
        f64::from(self.step.number()) / f64::from(STEP_COUNT) * 100.0
    }

    fn position_choice(&self) -> Result<PositionChoice, NominationError> {
        NOMINATION_POSITIONS
            .iter()
            .find(|(id, _)| *id == self.draft.position_id)
            .map(|(id, title)| PositionChoice {
                position_id: (*id).to_owned(),
                title: (*title).to_owned(),
            })
            .ok_or(NominationError::MissingPosition)
    }

    fn profile(&self) -> Result<Profile, NominationError> {
        match (required(&self.draft.bio), required(&self.draft.experience)) {
            (Some(bio), Some(experience)) => Ok(Profile { bio, experience }),
            _ => Err(NominationError::IncompleteProfile),
        }
    }

    fn platform(&self) -> Result<Platform, NominationError> {
        match (required(&self.draft.manifesto), required(&self.draft.goals)) {
            (Some(manifesto), Some(goals)) => Ok(Platform { manifesto, goals }),
            _ => Err(NominationError::IncompletePlatform),
        }
    }

    /// Validate the current step's fields and move forward.
    ///
    /// # Errors
    ///
    /// Returns the current step's validation error and stays put.
    pub fn advance(&mut self) -> Result<(), NominationError> {
        let next = match &self.step {
            NominationStep::Position => NominationStep::Profile {
                position: self.position_choice()?,
            },
            NominationStep::Profile { position } => NominationStep::Platform {
                position: position.clone(),
                profile: self.profile()?,
            },
            NominationStep::Platform { position, profile } => NominationStep::Review {
                nomination: Nomination {
                    position: position.clone(),
                    profile: profile.clone(),
                    platform: self.platform()?,
                    photo: self.draft.photo.clone(),
                },
            },
            NominationStep::Review { .. } => return Ok(()),
        };
        self.step = next;
        Ok(())
    }

    /// Return to the previous step; draft text is kept.
    pub fn back(&mut self) {
        self.step = match std::mem::take(&mut self.step) {
            NominationStep::Position | NominationStep::Profile { .. } => NominationStep::Position,
            NominationStep::Platform { position, .. } => NominationStep::Profile { position },
            NominationStep::Review { nomination } => NominationStep::Platform {
                position: nomination.position,
                profile: nomination.profile,
            },
        };
    }

    /// Check a chosen photo and attach its preview URL.
    ///
    /// Returns the preview it replaced so the caller can release it.
    ///
    /// # Errors
    ///
    /// Returns the photo's [`ValidationError`] and keeps the current photo.
    pub fn attach_photo(
        &mut self,
        content_type: &str,
        size_bytes: u64,
        preview: String,
    ) -> Result<Option<String>, ValidationError> {
        validate_photo(content_type, size_bytes)?;
        Ok(self.draft.photo.replace(preview))
    }

    /// Drop the attached photo, returning its preview URL.
    pub fn detach_photo(&mut self) -> Option<String> {
        self.draft.photo.take()
    }

    /// Final check before submission.
    ///
    /// # Errors
    ///
    /// Fails outside review or when the terms box is unchecked.
    pub fn submit(&self) -> Result<Nomination, NominationError> {
        let NominationStep::Review { nomination } = &self.step else {
            return Err(NominationError::NotInReview);
        };
        if !self.draft.terms_accepted {
            return Err(NominationError::TermsNotAccepted);
        }
        Ok(nomination.clone())
    }
}
