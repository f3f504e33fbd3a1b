use super::*;
use crate::util::validate::MAX_PHOTO_BYTES;

fn filled_wizard() -> NominationWizard {
    let mut wizard = NominationWizard::new();
    wizard.draft = NominationDraft {
        position_id: "3".to_owned(),
        bio: "Second-year accounting student".to_owned(),
        experience: "Society treasurer".to_owned(),
        manifesto: "Transparent budgets".to_owned(),
        goals: "Publish monthly statements".to_owned(),
        photo: None,
        terms_accepted: false,
    };
    wizard
}

#[test]
fn wizard_starts_on_position_step() {
    let wizard = NominationWizard::new();
    assert_eq!(wizard.step(), &NominationStep::Position);
    assert_eq!(wizard.step().number(), 1);
    assert_eq!(wizard.progress_percent(), 25.0);
}

#[test]
fn position_step_requires_known_position() {
    let mut wizard = NominationWizard::new();
    assert_eq!(wizard.advance(), Err(NominationError::MissingPosition));
    wizard.draft.position_id = "99".to_owned();
    assert_eq!(wizard.advance(), Err(NominationError::MissingPosition));
    assert_eq!(wizard.step(), &NominationStep::Position);
}

#[test]
fn profile_step_requires_bio_and_experience() {
    let mut wizard = filled_wizard();
    wizard.draft.experience = "   ".to_owned();
    wizard.advance().unwrap();
    assert_eq!(wizard.advance(), Err(NominationError::IncompleteProfile));
    assert_eq!(wizard.step().number(), 2);
}

#[test]
fn platform_step_requires_manifesto_and_goals() {
    let mut wizard = filled_wizard();
    wizard.draft.goals.clear();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.advance(), Err(NominationError::IncompletePlatform));
    assert_eq!(
        NominationError::IncompletePlatform.to_string(),
        "Please provide your manifesto and goals"
    );
}

#[test]
fn full_walk_reaches_review_with_typed_data() {
    let mut wizard = filled_wizard();
    wizard.draft.bio = "  padded bio  ".to_owned();
    for _ in 0..3 {
        wizard.advance().unwrap();
    }
    assert_eq!(wizard.progress_percent(), 100.0);
    let NominationStep::Review { nomination } = wizard.step() else {
        panic!("expected review step");
    };
    assert_eq!(nomination.position.title, "Treasurer");
    assert_eq!(nomination.profile.bio, "padded bio");
}

#[test]
fn submit_requires_review_and_terms() {
    let mut wizard = filled_wizard();
    assert_eq!(wizard.submit(), Err(NominationError::NotInReview));
    for _ in 0..3 {
        wizard.advance().unwrap();
    }
    assert_eq!(wizard.submit(), Err(NominationError::TermsNotAccepted));
    wizard.draft.terms_accepted = true;
    let nomination = wizard.submit().unwrap();
    assert_eq!(nomination.position.position_id, "3");
}

#[test]
fn back_keeps_draft_and_validated_prefix() {
    let mut wizard = filled_wizard();
    for _ in 0..3 {
        wizard.advance().unwrap();
    }
    wizard.back();
    assert!(matches!(wizard.step(), NominationStep::Platform { .. }));
    wizard.back();
    wizard.back();
    assert_eq!(wizard.step(), &NominationStep::Position);
    wizard.back();
    assert_eq!(wizard.step(), &NominationStep::Position);
    assert_eq!(wizard.draft.manifesto, "Transparent budgets");
}

#[test]
fn editing_after_back_is_revalidated() {
    let mut wizard = filled_wizard();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.back();
    wizard.draft.bio.clear();
    assert_eq!(wizard.advance(), Err(NominationError::IncompleteProfile));
}

#[test]
fn step_titles_follow_wizard_order() {
    let mut wizard = filled_wizard();
    let mut titles = vec![wizard.step().title()];
    for _ in 0..3 {
        wizard.advance().unwrap();
        titles.push(wizard.step().title());
    }
    assert_eq!(
        titles,
        vec!["Select Position", "Your Profile", "Manifesto & Goals", "Review & Submit"]
    );
}

#[test]
fn attach_photo_returns_replaced_preview() {
    let mut wizard = NominationWizard::new();
    assert_eq!(wizard.attach_photo("image/png", 1024, "blob:first".to_owned()), Ok(None));
    assert_eq!(
        wizard.attach_photo("image/jpeg", 2048, "blob:second".to_owned()),
        Ok(Some("blob:first".to_owned()))
    );
    assert_eq!(wizard.draft.photo.as_deref(), Some("blob:second"));
}

#[test]
fn rejected_photo_keeps_current_preview() {
    let mut wizard = NominationWizard::new();
    wizard.attach_photo("image/png", 1024, "blob:kept".to_owned()).unwrap();

    let not_image = wizard.attach_photo("application/pdf", 10, "blob:pdf".to_owned());
    assert_eq!(not_image, Err(ValidationError::NotAnImage));
    assert_eq!(not_image.unwrap_err().to_string(), "Please select an image file");

    let too_large = wizard.attach_photo("image/png", MAX_PHOTO_BYTES + 1, "blob:big".to_owned());
    assert_eq!(too_large.unwrap_err().to_string(), "Image must be less than 5MB");
    assert_eq!(wizard.draft.photo.as_deref(), Some("blob:kept"));
}

#[test]
fn detach_photo_hands_back_preview_once() {
    let mut wizard = NominationWizard::new();
    wizard.attach_photo("image/png", 1024, "blob:only".to_owned()).unwrap();
    assert_eq!(wizard.detach_photo(), Some("blob:only".to_owned()));
    assert_eq!(wizard.detach_photo(), None);
}

#[test]
fn review_carries_attached_photo() {
    let mut wizard = filled_wizard();
    wizard.attach_photo("image/png", 1024, "blob:face".to_owned()).unwrap();
    for _ in 0..3 {
        wizard.advance().unwrap();
    }
    wizard.draft.terms_accepted = true;
    assert_eq!(wizard.submit().unwrap().photo.as_deref(), Some("blob:face"));
}
