use backlink_core::{update, AppState, Effect, FormSettings, Msg, SessionState};

fn init_logging() {
    backlink_logging::initialize_for_tests();
}

/// Runs one generation to completion, answering each batch in full.
fn generate(state: AppState, input: &str, total_count: u32) -> AppState {
    let (mut state, mut effects) = update(
        state,
        Msg::GenerateSubmitted {
            input: input.to_string(),
            settings: FormSettings {
                total_count,
                ..FormSettings::default()
            },
        },
    );
    while let Some(size) = effects.iter().find_map(|effect| match effect {
        Effect::RequestBatch(request) => Some(request.batch_size),
        _ => None,
    }) {
        let items = (0..size).map(|i| format!("item {i}")).collect();
        let (next, next_effects) = update(state, Msg::BatchSucceeded { items });
        state = next;
        effects = next_effects;
    }
    state
}

#[test]
fn deleting_only_item_removes_group() {
    init_logging();
    let state = generate(AppState::new(), "https://a.example:alpha", 1);
    assert_eq!(state.groups().len(), 1);
    let item_id = state.groups()[0].items[0].id;

    let (state, effects) = update(state, Msg::DeleteItem { item_id });
    assert!(effects.is_empty());
    assert!(state.groups().is_empty());
    assert_eq!(state.view().total_items, 0);
}

#[test]
fn deleting_one_of_many_items_keeps_group() {
    init_logging();
    let state = generate(AppState::new(), "https://a.example:alpha", 3);
    let item_id = state.groups()[0].items[1].id;

    let (state, _) = update(state, Msg::DeleteItem { item_id });
    let contents: Vec<_> = state.groups()[0]
        .items
        .iter()
        .map(|item| item.content.as_str())
        .collect();
    assert_eq!(contents, vec!["item 0", "item 2"]);
}

#[test]
fn empty_first_reply_keeps_pair_in_first_seen_order() {
    init_logging();
    let input = "https://a.example:alpha\nhttps://b.example:beta\nhttps://a.example:alpha";
    let (mut state, mut effects) = update(
        AppState::new(),
        Msg::GenerateSubmitted {
            input: input.to_string(),
            settings: FormSettings {
                total_count: 10,
                ..FormSettings::default()
            },
        },
    );

    let mut replies = vec![Vec::new(), vec!["beta 1".to_string()], vec!["alpha 1".to_string()]]
        .into_iter();
    while effects
        .iter()
        .any(|effect| matches!(effect, Effect::RequestBatch(_)))
    {
        let items = replies.next().expect("one reply per batch");
        let (next, next_effects) = update(state, Msg::BatchSucceeded { items });
        state = next;
        effects = next_effects;
    }

    let order: Vec<_> = state.groups().iter().map(|g| g.keyword.as_str()).collect();
    assert_eq!(order, vec!["alpha", "beta"]);
    assert_eq!(state.groups()[0].items.len(), 1);
    assert_eq!(state.view().active_index, 0);
}

#[test]
fn view_tracks_active_group_and_navigation() {
    init_logging();
    let input = "https://a.example:alpha\nhttps://b.example:beta\nhttps://c.example:gamma";
    let state = generate(AppState::new(), input, 2);

    let view = state.view();
    assert_eq!(view.session, SessionState::Idle);
    assert_eq!(view.groups.len(), 3);
    assert_eq!(view.total_items, 6);
    assert_eq!(view.active_index, 2);
    assert!(view.groups[2].is_active);
    assert_eq!(view.groups[0].label, "Profile / Bio Texts");
    assert_eq!(view.active_items.len(), 2);

    let (state, _) = update(state, Msg::PreviousGroup);
    let (state, _) = update(state, Msg::PreviousGroup);
    let (state, _) = update(state, Msg::PreviousGroup);
    assert_eq!(state.view().active_index, 0);

    let (state, _) = update(state, Msg::GroupSelected { index: 9 });
    assert_eq!(state.view().active_index, 0);
    let (state, _) = update(state, Msg::NextGroup);
    assert_eq!(state.view().active_index, 1);

    let group_id = state.groups()[1].id;
    let (state, _) = update(state, Msg::DeleteGroup { group_id });
    assert_eq!(state.view().active_index, 0);
    assert_eq!(state.groups().len(), 2);

    let (mut state, _) = update(state, Msg::ClearAll);
    assert!(state.groups().is_empty());
    assert_eq!(state.view().active_index, 0);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn describe_uses_first_url_and_records_result() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::DescribeRequested {
            input: "\nhttps://shop.example/about:shoes\nhttps://other.example:x".to_string(),
            language: None,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RequestDescription {
            url: "https://shop.example/about".to_string(),
            language: None,
        }]
    );
    assert_eq!(state.session(), SessionState::Describing);

    let (state, effects) = update(
        state,
        Msg::DescribeRequested {
            input: "https://again.example".to_string(),
            language: None,
        },
    );
    assert!(effects.is_empty(), "second describe while busy must be ignored");

    let (state, _) = update(
        state,
        Msg::DescribeSucceeded {
            description: "Shop sells shoes.".to_string(),
        },
    );
    assert_eq!(state.description(), Some("Shop sells shoes."));
    assert_eq!(state.session(), SessionState::Idle);
}

#[test]
fn describe_accepts_url_without_keyword_but_rejects_bad_protocol() {
    init_logging();
    let (_state, effects) = update(
        AppState::new(),
        Msg::DescribeRequested {
            input: "HTTPS://bare.example".to_string(),
            language: Some("English".to_string()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RequestDescription {
            url: "https://bare.example".to_string(),
            language: Some("English".to_string()),
        }]
    );

    let (state, effects) = update(
        AppState::new(),
        Msg::DescribeRequested {
            input: "ftp://files.example:x".to_string(),
            language: None,
        },
    );
    assert!(effects.is_empty());
    assert!(state.error().is_some());
}

#[test]
fn describe_failure_surfaces_message_verbatim() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::DescribeRequested {
            input: "https://slow.example:x".to_string(),
            language: None,
        },
    );
    let (state, _) = update(
        state,
        Msg::DescribeFailed {
            message: "connection timed out".to_string(),
        },
    );
    assert_eq!(state.error(), Some("connection timed out"));
    assert_eq!(state.session(), SessionState::Idle);
}
