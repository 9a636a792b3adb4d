//! Checked-in fixtures run, persist and verify end to end.

use lock_tests::checked_in_fixture;
use octile_harness::bundle::verify_bundle;
use octile_harness::bundle_dir::{read_bundle_dir, write_bundle_dir, BundleDirError};
use octile_harness::fixture::{load_fixture, FixtureError};
use octile_harness::runner::{run_fixture, REPORT_ARTIFACT};

const FIXTURES: &[&str] = &["demo.json", "supersession.json", "stale_discard.json"];

#[test]
fn every_fixture_bundle_survives_disk() {
    for name in FIXTURES {
        let bundle = run_fixture(&checked_in_fixture(name)).unwrap();
        verify_bundle(&bundle).unwrap();

        let dir = tempfile::tempdir().unwrap();
        write_bundle_dir(&bundle, dir.path()).unwrap();
        let loaded = read_bundle_dir(dir.path()).unwrap();
        assert_eq!(loaded, bundle, "{name} changed on disk");
    }
}

#[test]
fn edited_report_on_disk_is_detected() {
    let bundle = run_fixture(&checked_in_fixture("demo.json")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_bundle_dir(&bundle, dir.path()).unwrap();

    std::fs::write(dir.path().join(REPORT_ARTIFACT), b"not the report\n").unwrap();
    assert!(matches!(
        read_bundle_dir(dir.path()),
        Err(BundleDirError::ManifestMismatch)
    ));
}

#[test]
fn malformed_fixture_reports_the_field() {
    let err = load_fixture(&lock_tests::fixture_path("malformed_start.json")).unwrap_err();
    assert!(matches!(err, FixtureError::InvalidState { field: "start", .. }));
}
