mod common;

use common::{Calls, FakeBackend, FakeNsfw, FakeSocial, FakeTranslator, comment};
use prompt_selector::{
    FallbackReason, Origin, SafetyMode, SelectionConfig, SelectionError, SelectionPolicy, ServiceKind,
    config::DEFAULT_FALLBACK_PROMPT,
};

fn policy(
    cfg: SelectionConfig,
    calls: &Calls,
) -> SelectionPolicy<FakeBackend, FakeTranslator, FakeNsfw> {
    SelectionPolicy::new(
        cfg,
        FakeBackend::new(calls.clone()),
        FakeTranslator::new(calls.clone()),
        FakeNsfw::new(calls.clone()),
    )
}

fn tie_comments() -> Vec<prompt_selector::Comment> {
    vec![
        comment("c", "PROMPT: a green dragon in a cave", "carol", 2),
        comment("a", "prompt: a red fox in the snow", "alice", 5),
        comment("b", "Prompt: a blue whale at sunset #art", "bob", 5),
    ]
}

#[tokio::test]
async fn tied_likes_keep_fetch_order_through_every_stage() {
    let calls = Calls::default();
    let p = policy(SelectionConfig::default(), &calls);

    let out = p.select(true, Some(tie_comments())).await.unwrap();

    assert_eq!(
        calls.with_prefix("classify:"),
        vec!["a red fox in the snow", "a blue whale at sunset", "a green dragon in a cave"]
    );
    assert_eq!(
        calls.with_prefix("translate:"),
        vec!["a red fox in the snow", "a blue whale at sunset", "a green dragon in a cave"]
    );
    assert_eq!(out.prompt_text, "A RED FOX IN THE SNOW");
    assert_eq!(out.username, "alice");
    assert_eq!(
        out.origin,
        Origin::Comment {
            comment_id: "a".to_string()
        }
    );
}

#[tokio::test]
async fn next_tied_comment_wins_when_first_is_nsfw() {
    let calls = Calls::default();
    let p = SelectionPolicy::new(
        SelectionConfig::default(),
        FakeBackend::new(calls.clone()),
        FakeTranslator::new(calls.clone()),
        FakeNsfw::flagging(calls.clone(), &["A RED FOX IN THE SNOW"], 0.95),
    );

    let out = p.select(true, Some(tie_comments())).await.unwrap();
    assert_eq!(out.username, "bob");
    assert_eq!(out.prompt_text, "A BLUE WHALE AT SUNSET");
}

#[tokio::test]
async fn empty_comments_fall_back_without_calling_services() {
    let calls = Calls::default();
    let p = policy(SelectionConfig::default(), &calls);

    let out = p.select(true, Some(Vec::new())).await.unwrap();
    assert_eq!(out.prompt_text, DEFAULT_FALLBACK_PROMPT);
    assert_eq!(out.username, "me");
    assert_eq!(
        out.origin,
        Origin::Fallback {
            reason: FallbackReason::NoComments
        }
    );

    let out = p.select(true, None).await.unwrap();
    assert!(out.is_fallback());
    assert!(calls.all().is_empty());
}

#[tokio::test]
async fn single_safe_comment_yields_its_translation_and_author() {
    let calls = Calls::default();
    let mut translator = FakeTranslator::new(calls.clone());
    translator.map.insert(
        "un renard avec un chapeau".to_string(),
        "a fox with a hat".to_string(),
    );
    let p = SelectionPolicy::new(
        SelectionConfig::default(),
        FakeBackend::new(calls.clone()),
        translator,
        FakeNsfw::new(calls.clone()),
    );

    let out = p
        .select(true, Some(vec![comment("1", "PROMPT: Un renard avec un chapeau", "zoe", 0)]))
        .await
        .unwrap();
    assert_eq!(out.prompt_text, "a fox with a hat");
    assert_eq!(out.username, "zoe");
    assert!(!out.is_fallback());
}

#[tokio::test]
async fn no_media_skips_comment_fetch() {
    let calls = Calls::default();
    let p = policy(SelectionConfig::default(), &calls);
    let social = FakeSocial {
        calls: calls.clone(),
        media_id: None,
        comments: tie_comments(),
    };

    let out = p.select_latest(&social).await.unwrap();
    assert_eq!(
        out.origin,
        Origin::Fallback {
            reason: FallbackReason::NoMedia
        }
    );
    assert_eq!(calls.all(), vec!["latest_media_id:".to_string()]);
}

#[tokio::test]
async fn latest_media_comments_are_selected_from() {
    let calls = Calls::default();
    let p = policy(SelectionConfig::default(), &calls);
    let social = FakeSocial {
        calls: calls.clone(),
        media_id: Some("17900".to_string()),
        comments: tie_comments(),
    };

    let out = p.select_latest(&social).await.unwrap();
    assert_eq!(out.username, "alice");
    assert_eq!(calls.with_prefix("comments:"), vec!["17900"]);
}

#[tokio::test]
async fn heuristic_rejects_everything_before_any_service_call() {
    let calls = Calls::default();
    let p = policy(SelectionConfig::default(), &calls);
    let comments = vec![
        comment("1", "I love this! 😍😍😍", "u1", 40),
        comment("2", "prompt: www.example.com nice", "u2", 30),
        comment("3", "prompt: 🐱🐱🐱🐱 cat 🐶🐶🐶🐶", "u3", 20),
    ];

    let out = p.select(true, Some(comments)).await.unwrap();
    assert_eq!(
        out.origin,
        Origin::Fallback {
            reason: FallbackReason::NoPromptLike
        }
    );
    assert!(calls.all().is_empty());
}

#[tokio::test]
async fn all_ineligible_falls_back_before_translation() {
    let calls = Calls::default();
    let p = SelectionPolicy::new(
        SelectionConfig::default(),
        FakeBackend::rejecting(calls.clone(), &["a"]),
        FakeTranslator::new(calls.clone()),
        FakeNsfw::new(calls.clone()),
    );

    let out = p.select(true, Some(tie_comments())).await.unwrap();
    assert_eq!(
        out.origin,
        Origin::Fallback {
            reason: FallbackReason::NoEligible
        }
    );
    assert!(calls.with_prefix("translate:").is_empty());
}

#[tokio::test]
async fn all_nsfw_falls_back() {
    let calls = Calls::default();
    let p = SelectionPolicy::new(
        SelectionConfig::default(),
        FakeBackend::new(calls.clone()),
        FakeTranslator::new(calls.clone()),
        FakeNsfw::flagging(
            calls.clone(),
            &["A RED FOX IN THE SNOW", "A BLUE WHALE AT SUNSET", "A GREEN DRAGON IN A CAVE"],
            0.8,
        ),
    );

    let out = p.select(true, Some(tie_comments())).await.unwrap();
    assert_eq!(
        out.origin,
        Origin::Fallback {
            reason: FallbackReason::NoSafe
        }
    );
}

#[tokio::test]
async fn short_classifier_answer_aborts_the_run() {
    let calls = Calls::default();
    let one_result = r#"{"results":[{"index":1,"eligible":true,"reason":"ok"}]}"#;
    let p = SelectionPolicy::new(
        SelectionConfig::default(),
        FakeBackend::canned(calls.clone(), one_result),
        FakeTranslator::new(calls.clone()),
        FakeNsfw::new(calls.clone()),
    );

    let err = p.select(true, Some(tie_comments())).await.unwrap_err();
    assert!(err.is_schema());
    assert!(calls.with_prefix("translate:").is_empty());
}

#[tokio::test]
async fn translation_failure_propagates_as_external_error() {
    let calls = Calls::default();
    let mut translator = FakeTranslator::new(calls.clone());
    translator.fail = true;
    let p = SelectionPolicy::new(
        SelectionConfig::default(),
        FakeBackend::new(calls.clone()),
        translator,
        FakeNsfw::new(calls.clone()),
    );

    match p.select(true, Some(tie_comments())).await {
        Err(SelectionError::External(e)) => assert_eq!(e.service, ServiceKind::Translation),
        other => panic!("expected external error, got {other:?}"),
    }
    assert!(calls.with_prefix("nsfw:").is_empty());
}

#[tokio::test]
async fn first_safe_mode_picks_the_same_winner_with_fewer_calls() {
    let eager_calls = Calls::default();
    let eager = policy(SelectionConfig::default(), &eager_calls);

    let lazy_calls = Calls::default();
    let lazy = policy(
        SelectionConfig {
            safety_mode: SafetyMode::FirstSafe,
            ..SelectionConfig::default()
        },
        &lazy_calls,
    );

    let a = eager.select(true, Some(tie_comments())).await.unwrap();
    let b = lazy.select(true, Some(tie_comments())).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(eager_calls.with_prefix("translate:").len(), 3);
    assert_eq!(lazy_calls.with_prefix("translate:"), vec!["a red fox in the snow"]);
}

#[tokio::test]
async fn selection_is_deterministic_for_the_same_snapshot() {
    let calls = Calls::default();
    let p = policy(SelectionConfig::default(), &calls);

    let first = p.select(true, Some(tie_comments())).await.unwrap();
    let second = p.select(true, Some(tie_comments())).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn only_top_k_comments_reach_the_classifier() {
    let calls = Calls::default();
    let p = policy(
        SelectionConfig {
            top_k: 2,
            ..SelectionConfig::default()
        },
        &calls,
    );

    p.select(true, Some(tie_comments())).await.unwrap();
    assert_eq!(calls.with_prefix("classify:").len(), 2);
}

#[tokio::test]
async fn configured_fallback_is_returned() {
    let calls = Calls::default();
    let mut cfg = SelectionConfig::default();
    cfg.fallback.prompt_text = "A lighthouse in a storm".to_string();
    cfg.fallback.username = "crowd_art".to_string();
    let p = policy(cfg, &calls);

    let out = p.select(false, Some(tie_comments())).await.unwrap();
    assert_eq!(out.prompt_text, "A lighthouse in a storm");
    assert_eq!(out.username, "crowd_art");
    assert!(calls.all().is_empty());
}
