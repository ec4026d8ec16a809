//! Unit tests for the stage catalogue.

use crate::order::domain::{PIPELINE, ParseStageError, Stage};
use rstest::rstest;

#[rstest]
#[case(Stage::Intake, "intake")]
#[case(Stage::SiteVisit, "site_visit")]
#[case(Stage::Design, "design")]
#[case(Stage::Production, "production")]
#[case(Stage::Ready, "ready")]
#[case(Stage::Standby, "standby")]
#[case(Stage::Installed, "installed")]
fn storage_strings_round_trip(#[case] stage: Stage, #[case] storage: &str) {
    assert_eq!(stage.as_str(), storage);
    assert_eq!(Stage::try_from(storage), Ok(stage));
}

#[rstest]
#[case("Site Visit", Stage::SiteVisit)]
#[case(" standby ", Stage::Standby)]
#[case("SITE-VISIT", Stage::SiteVisit)]
fn parsing_normalises_spacing_and_case(#[case] raw: &str, #[case] expected: Stage) {
    assert_eq!(Stage::try_from(raw), Ok(expected));
}

#[test]
fn unknown_names_fail_to_parse() {
    assert_eq!(
        Stage::try_from("warehouse"),
        Err(ParseStageError("warehouse".to_owned()))
    );
}

#[test]
fn the_pipeline_is_listed_in_display_order() {
    let mut expected = 1;
    for stage in PIPELINE {
        assert_eq!(stage.sort_order(), expected);
        expected += 1;
    }
}
