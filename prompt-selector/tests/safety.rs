mod common;

use common::{Calls, FakeNsfw, FakeTranslator, comment};
use prompt_selector::{Candidate, SafetyGate, SafetyMode, SelectionError, ServiceKind};

fn candidates(texts: &[&str]) -> Vec<Candidate> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut c = Candidate::new(comment(&format!("c{i}"), t, &format!("user{i}"), 0));
            c.text = t.to_string();
            c
        })
        .collect()
}

fn gate(calls: &Calls, nsfw: FakeNsfw, mode: SafetyMode) -> SafetyGate<FakeTranslator, FakeNsfw> {
    SafetyGate::new(FakeTranslator::new(calls.clone()), nsfw, "EN-US", 0.6, mode)
}

#[tokio::test]
async fn score_equal_to_threshold_is_not_flagged() {
    let calls = Calls::default();
    let g = gate(&calls, FakeNsfw::flagging(calls.clone(), &["A BEACH"], 0.6), SafetyMode::Eager);

    let safe = g.filter_safe(candidates(&["a beach"])).await.unwrap();
    assert_eq!(safe.len(), 1);
    assert_eq!(safe[0].is_nsfw, Some(false));
}

#[tokio::test]
async fn flagged_candidates_are_dropped_and_survivors_translated() {
    let calls = Calls::default();
    let g = gate(&calls, FakeNsfw::flagging(calls.clone(), &["A BEACH"], 0.61), SafetyMode::Eager);

    let safe = g.filter_safe(candidates(&["a beach", "a forest", "a lake"])).await.unwrap();
    let texts: Vec<&str> = safe.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["A FOREST", "A LAKE"]);
    assert_eq!(safe[0].translated_text.as_deref(), Some("A FOREST"));
    assert_eq!(safe[0].comment().text, "a forest");
    assert_eq!(calls.with_prefix("nsfw:"), vec!["A BEACH", "A FOREST", "A LAKE"]);
}

#[tokio::test]
async fn first_safe_stops_after_the_first_survivor() {
    let calls = Calls::default();
    let g = gate(&calls, FakeNsfw::flagging(calls.clone(), &["A BEACH"], 0.9), SafetyMode::FirstSafe);

    let safe = g.filter_safe(candidates(&["a beach", "a forest", "a lake"])).await.unwrap();
    assert_eq!(safe.len(), 1);
    assert_eq!(safe[0].username(), "user1");
    assert_eq!(calls.with_prefix("translate:"), vec!["a beach", "a forest"]);
}

#[tokio::test]
async fn empty_label_list_is_an_external_error() {
    let calls = Calls::default();
    let mut nsfw = FakeNsfw::new(calls.clone());
    nsfw.empty = true;
    let g = gate(&calls, nsfw, SafetyMode::Eager);

    match g.filter_safe(candidates(&["a beach"])).await {
        Err(SelectionError::External(e)) => assert_eq!(e.service, ServiceKind::NsfwClassifier),
        other => panic!("expected external error, got {other:?}"),
    }
}
