//! Record-replay round-trip integration test.
//!
//! Records an analysis run through `RecordingIssueTracker`, replays the
//! written cassette twice and checks that every run classifies the same
//! links the same way.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::json;

use sprintorder::adapters::recording::RecordingIssueTracker;
use sprintorder::adapters::replaying::ReplayingIssueTracker;
use sprintorder::analysis::{analyze, AnalysisOptions, ConflictCategory, IssuePosition};
use sprintorder::cassette::format::{Cassette, Interaction};
use sprintorder::cassette::recorder::CassetteRecorder;
use sprintorder::cassette::replayer::CassetteReplayer;
use sprintorder::context::ServiceContext;

fn interaction(seq: u64, method: &str, output: serde_json::Value) -> Interaction {
    Interaction { seq, port: "tracker".into(), method: method.into(), input: json!({}), output }
}

fn link(blocker_id: &str, blocker_key: &str) -> serde_json::Value {
    json!({
        "link_type": "is blocked by",
        "blocker_id": blocker_id,
        "blocker_key": blocker_key,
        "blocker_summary": format!("{blocker_key} summary"),
    })
}

/// Two boards. Web: W1 [web-1 blocked by api-2], W2 [web-2 blocked by web-3, web-3].
/// Api: A1 [api-1 blocked by OPS-7 (outside the project)], A2 [api-2].
fn upstream() -> Cassette {
    Cassette {
        name: "upstream".into(),
        recorded_at: Utc::now(),
        commit: "abc123".into(),
        interactions: vec![
            interaction(
                0,
                "list_boards",
                json!({"Ok": [{"id": 1, "name": "Web"}, {"id": 2, "name": "Api"}]}),
            ),
            interaction(
                1,
                "list_sprints",
                json!({"Ok": [{"id": 10, "name": "W1"}, {"id": 11, "name": "W2"}]}),
            ),
            interaction(
                2,
                "list_issues",
                json!({"Ok": [
                    {"id": "1", "key": "WEB-1", "summary": "Login form", "inward_links": [link("4", "API-2")]}
                ]}),
            ),
            interaction(
                3,
                "list_issues",
                json!({"Ok": [
                    {"id": "2", "key": "WEB-2", "summary": "Profile page", "inward_links": [link("5", "WEB-3")]},
                    {"id": "5", "key": "WEB-3", "summary": "Avatar upload", "inward_links": []}
                ]}),
            ),
            interaction(
                4,
                "list_sprints",
                json!({"Ok": [{"id": 20, "name": "A1"}, {"id": 21, "name": "A2"}]}),
            ),
            interaction(
                5,
                "list_issues",
                json!({"Ok": [
                    {"id": "3", "key": "API-1", "summary": "Auth service", "inward_links": [link("900", "OPS-7")]}
                ]}),
            ),
            interaction(
                6,
                "list_issues",
                json!({"Ok": [
                    {"id": "4", "key": "API-2", "summary": "Session API", "inward_links": []}
                ]}),
            ),
        ],
    }
}

#[tokio::test]
async fn recorded_run_replays_to_identical_report() {
    let dir = std::env::temp_dir().join("sprintorder_record_replay_test");
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("tracker.cassette.yaml");

    // --- Phase 1: record an analysis against the upstream tracker ---
    let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "roundtrip", "abc")));
    let recorded = {
        let upstream = ReplayingIssueTracker::new(CassetteReplayer::new(&upstream()));
        let tracker = RecordingIssueTracker::new(Box::new(upstream), Arc::clone(&recorder));
        analyze(&tracker, "SHOP", AnalysisOptions::default()).await.unwrap()
    };
    let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
    recorder.finish().unwrap();

    // Web ranks 0-1, Api ranks 2-3 under the shared counter.
    let conflicts: Vec<_> = recorded
        .conflicts
        .conflicts
        .iter()
        .map(|r| (r.blocked.key.as_str(), r.blocker.key.as_str()))
        .collect();
    assert_eq!(conflicts, vec![("API-1", "OPS-7"), ("WEB-1", "API-2")]);
    let internal: Vec<_> =
        recorded.conflicts.internal.iter().map(|r| r.blocked.key.as_str()).collect();
    assert_eq!(internal, vec!["WEB-2"]);
    assert!(recorded.conflicts.external.is_empty());

    let web_blocker = recorded.conflicts.conflicts.iter().find(|r| r.blocked.key == "WEB-1").unwrap();
    assert_eq!(web_blocker.category, ConflictCategory::Conflict);
    assert_eq!(web_blocker.blocker.position, IssuePosition::Found { rank: 3, sprint_id: 21 });

    // --- Phase 2: replay the written cassette twice ---
    for _ in 0..2 {
        let ctx = ServiceContext::replaying(&cassette_path).unwrap();
        let replayed = analyze(ctx.tracker.as_ref(), "SHOP", AnalysisOptions::default()).await.unwrap();
        assert_eq!(replayed.conflicts, recorded.conflicts, "replay classified links differently");
        assert_eq!(replayed.boards, recorded.boards, "replay grouped issues differently");
    }

    let _ = std::fs::remove_dir_all(&dir);
}
