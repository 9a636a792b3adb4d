//! Golden lock: canonical trace bytes and digests for checked-in fixtures.
//!
//! Any change to move order, tie-breaking, cost units, JSON field names or
//! hash domains moves these values. Update them only with a deliberate
//! format version bump.

use lock_tests::{checked_in_fixture, state, DEMO_START, GOAL};
use octile_harness::runner::{run_fixture, TRACE_ARTIFACT};
use octile_search::policy::SearchPolicyV1;
use octile_search::search::search;

const DEMO_LIMIT_1_TRACE: &str = concat!(
    r#"{"expansions":[{"children":["#,
    r#"{"f_tenths":74,"g_tenths":10,"h_tenths":64,"index":0,"move":"down","outcome":{"node_id":1,"type":"queued"},"state":[8,1,3,0,2,6,7,5,4]},"#,
    r#"{"f_tenths":54,"g_tenths":10,"h_tenths":44,"index":1,"move":"right","outcome":{"node_id":2,"type":"queued"},"state":[1,0,3,8,2,6,7,5,4]},"#,
    r#"{"f_tenths":68,"g_tenths":14,"h_tenths":54,"index":2,"move":"down_right","outcome":{"node_id":3,"type":"queued"},"state":[2,1,3,8,0,6,7,5,4]}],"#,
    r#""expansion_index":1,"f_tenths":54,"g_tenths":0,"h_tenths":54,"is_goal":false,"node_id":0,"state":[0,1,3,8,2,6,7,5,4]}],"#,
    r#""metadata":{"frontier_high_water":3,"#,
    r#""goal_fingerprint":"34b9fc8fcca59903cd839204215e8e563a915d6d23949f99a0d15fb9cf24391f","#,
    r#""max_expansions":1,"#,
    r#""start_fingerprint":"e8acc71470d4d93f87244f0076911dd70bbf7b2344948037f897b1ad66b41a0c","#,
    r#""termination_reason":{"limit":1,"type":"expansion_limit_reached"},"#,
    r#""total_already_closed":0,"total_already_queued":0,"total_children_generated":3,"#,
    r#""total_expansions":1,"total_queued":3,"total_stale_discarded":0,"total_superseded":0}}"#,
);

struct Golden {
    fixture: &'static str,
    trace_digest: &'static str,
    trace_artifact_hash: &'static str,
    bundle_digest: &'static str,
}

const GOLDENS: &[Golden] = &[
    Golden {
        fixture: "demo.json",
        trace_digest: "sha256:baa6dcd08fc6063f6473cd83563d3b1aebac6480cc5586e740f51360fabd8f5d",
        trace_artifact_hash: "sha256:55339a63370715ee652bd175e2669e2e12c7724d98deddfa6578ac89f49a4f46",
        bundle_digest: "sha256:8844e61161a6cf625b53e34237a541a4917a650f59618b37b9c1f22a3407bb19",
    },
    Golden {
        fixture: "supersession.json",
        trace_digest: "sha256:2d1cce7950b469cd3a4fd3d73d51278a6726f8aef0382e5a1d36982efbdd3b41",
        trace_artifact_hash: "sha256:710f44f6ddd481d1a605f04e1258caf800b783c3af867a1088557ab78e833a91",
        bundle_digest: "sha256:4c151c0b1f28c3600f4d288f285b8f81e972f5c69c7f5e7bd9e5abf35bfccb50",
    },
    Golden {
        fixture: "stale_discard.json",
        trace_digest: "sha256:c4c9005810aa8baac05bdcb8fdc9edb1cd623f1891770ce65c264381a0384ffd",
        trace_artifact_hash: "sha256:96496dfb9791b5cc0afe01e614bd4d9cb94f61a6e35e0a86a02a605abe2f3259",
        bundle_digest: "sha256:e15b711b0a94f863b3d4714b7f5abbe036c24f2eee7fe97eb1054c1c4c972cd9",
    },
];

#[test]
fn demo_single_expansion_bytes_locked() {
    let result = search(
        &state(DEMO_START),
        &state(GOAL),
        &SearchPolicyV1::with_max_expansions(1),
    )
    .unwrap();
    let bytes = result.trace.to_canonical_json_bytes().unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), DEMO_LIMIT_1_TRACE);
    assert_eq!(
        result.trace.digest().unwrap().as_str(),
        "sha256:83f9311a9bbce826fdec77a388ab3c1c9d216aa13c14b78cccfbbdb236fd7e51"
    );
}

#[test]
fn goal_start_digest_locked() {
    let result = search(
        &state(GOAL),
        &state(GOAL),
        &SearchPolicyV1::with_max_expansions(5),
    )
    .unwrap();
    assert_eq!(
        result.trace.digest().unwrap().as_str(),
        "sha256:cfc0bae9a58ed67da564832e028c67580b2ad30af73ecd8e9e038d944c9ba8f2"
    );
}

#[test]
fn checked_in_fixture_digests_locked() {
    for golden in GOLDENS {
        let fixture = checked_in_fixture(golden.fixture);
        let result = search(&fixture.start, &fixture.goal, &fixture.policy).unwrap();
        assert_eq!(
            result.trace.digest().unwrap().as_str(),
            golden.trace_digest,
            "trace digest drifted for {}",
            golden.fixture
        );

        let bundle = run_fixture(&fixture).unwrap();
        let trace = bundle.artifact(TRACE_ARTIFACT).unwrap();
        assert_eq!(
            trace.content_hash.as_str(),
            golden.trace_artifact_hash,
            "trace artifact hash drifted for {}",
            golden.fixture
        );
        assert_eq!(
            bundle.digest.as_str(),
            golden.bundle_digest,
            "bundle digest drifted for {}",
            golden.fixture
        );
    }
}
