//! Lock test: hash domain prefixes and state fingerprints are frozen.

use lock_tests::{state, DEMO_START, GOAL};
use octile_kernel::proof::hash::{
    canonical_hash, DOMAIN_BUNDLE_ARTIFACT, DOMAIN_BUNDLE_DIGEST, DOMAIN_GRID_STATE,
    DOMAIN_SEARCH_TRACE,
};

#[test]
fn domain_prefixes_are_frozen() {
    assert_eq!(DOMAIN_GRID_STATE, b"OCTILE::GRID_STATE::V1\0");
    assert_eq!(DOMAIN_SEARCH_TRACE, b"OCTILE::SEARCH_TRACE::V1\0");
    assert_eq!(DOMAIN_BUNDLE_ARTIFACT, b"OCTILE::BUNDLE_ARTIFACT::V1\0");
    assert_eq!(DOMAIN_BUNDLE_DIGEST, b"OCTILE::BUNDLE_DIGEST::V1\0");
}

#[test]
fn domains_are_distinct_and_nul_terminated() {
    let all = [
        DOMAIN_GRID_STATE,
        DOMAIN_SEARCH_TRACE,
        DOMAIN_BUNDLE_ARTIFACT,
        DOMAIN_BUNDLE_DIGEST,
    ];
    for (i, a) in all.iter().enumerate() {
        assert_eq!(a.last(), Some(&0));
        assert_eq!(a.iter().position(|&b| b == 0), Some(a.len() - 1));
        for b in &all[i + 1..] {
            assert_ne!(canonical_hash(a, b"x"), canonical_hash(b, b"x"));
        }
    }
}

#[test]
fn state_fingerprints_are_frozen() {
    assert_eq!(
        state(GOAL).fingerprint().as_str(),
        "sha256:34b9fc8fcca59903cd839204215e8e563a915d6d23949f99a0d15fb9cf24391f"
    );
    assert_eq!(
        state(DEMO_START).fingerprint().as_str(),
        "sha256:e8acc71470d4d93f87244f0076911dd70bbf7b2344948037f897b1ad66b41a0c"
    );
}
