use leptos::prelude::{Get, RwSignal};
use leptos::reactive::owner::Owner;

use super::*;

#[test]
fn tick_counts_down_to_zero() {
    let owner = Owner::new();
    owner.with(|| {
        let remaining = RwSignal::new(2_u32);
        assert!(tick(remaining));
        assert_eq!(remaining.get(), 1);
        assert!(!tick(remaining));
        assert_eq!(remaining.get(), 0);
        assert!(!tick(remaining));
        assert_eq!(remaining.get(), 0);
    });
}

#[test]
fn tick_stops_once_page_is_torn_down() {
    let owner = Owner::new();
    let remaining = owner.with(|| RwSignal::new(30_u32));
    owner.cleanup();
    assert!(!tick(remaining));
}

#[test]
fn demo_fill_uses_configured_code() {
    let config = AppConfig {
        otp_code: "000111".to_owned(),
        ..AppConfig::instant()
    };
    let mut entry = OtpEntry::default();
    entry.fill(&config.otp_code);
    assert_eq!(entry.code().as_deref(), Ok("000111"));
}
