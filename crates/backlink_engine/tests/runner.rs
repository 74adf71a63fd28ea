use std::sync::{Arc, Mutex};

use backlink_core::{AppState, ContentType, FormSettings, Msg, SessionState};
use backlink_engine::{
    BatchGenerator, DescribeError, Describer, GenerateData, GenerateError, GenerateRequest,
    ProgressSink, RunDriver, RunEvent,
};
use pretty_assertions::assert_eq;

/// Answers every batch with numbered items; fails the call at `fail_at`.
#[derive(Default)]
struct CountingGenerator {
    fail_at: Option<usize>,
    calls: Mutex<Vec<GenerateRequest>>,
}

#[async_trait::async_trait]
impl BatchGenerator for CountingGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateData, GenerateError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(request.clone());
        if self.fail_at == Some(index) {
            return Err(GenerateError::Rejected("quota exhausted".to_string()));
        }
        Ok(GenerateData {
            content_type: request.content_type.clone(),
            title: String::new(),
            items: (0..request.batch_size)
                .map(|n| format!("{} #{index}.{n}", request.keyword))
                .collect(),
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<RunEvent>>,
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct FixedDescriber;

#[async_trait::async_trait]
impl Describer for FixedDescriber {
    async fn describe(&self, url: &str, _language: Option<&str>) -> Result<String, DescribeError> {
        if url.contains("fail") {
            return Err(DescribeError::FetchTimeout("Connection timed out".to_string()));
        }
        Ok(format!("About {url}"))
    }
}

fn submit(input: &str, total_count: u32) -> Msg {
    Msg::GenerateSubmitted {
        input: input.to_string(),
        settings: FormSettings {
            brand: "Acme".to_string(),
            content_type: ContentType::Article,
            total_count,
            ..FormSettings::default()
        },
    }
}

#[tokio::test]
async fn driver_runs_every_batch_in_order() {
    backlink_logging::initialize_for_tests();
    let generator = Arc::new(CountingGenerator::default());
    let sink = Arc::new(RecordingSink::default());
    let driver = RunDriver::new(sink.clone()).with_generator(generator.clone());

    let state = driver
        .dispatch(
            AppState::new(),
            submit("https://a.example:alpha\nhttps://b.example:beta", 15),
        )
        .await;

    assert_eq!(state.session(), SessionState::Idle);
    assert_eq!(state.error(), None);
    let sizes: Vec<_> = state.groups().iter().map(|g| g.items.len()).collect();
    assert_eq!(sizes, vec![15, 15]);

    let calls = generator.calls.lock().unwrap();
    let order: Vec<_> = calls
        .iter()
        .map(|c| (c.keyword.as_str(), c.batch_size))
        .collect();
    assert_eq!(
        order,
        vec![("alpha", 10), ("alpha", 5), ("beta", 10), ("beta", 5)]
    );
    assert!(calls.iter().all(|c| c.content_type == "article" && c.brand == "Acme"));

    let events = sink.events.lock().unwrap();
    assert_eq!(events.last(), Some(&RunEvent::ProgressCleared));
    let completed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Progress(p) if p.current_keyword == "beta" => Some(p.completed),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![0, 10, 10, 15]);
}

#[tokio::test]
async fn failure_stops_the_run_and_keeps_earlier_groups() {
    let generator = Arc::new(CountingGenerator {
        fail_at: Some(3),
        ..CountingGenerator::default()
    });
    let sink = Arc::new(RecordingSink::default());
    let driver = RunDriver::new(sink.clone()).with_generator(generator.clone());

    let state = driver
        .dispatch(
            AppState::new(),
            submit("https://a.example:alpha\nhttps://b.example:beta", 20),
        )
        .await;

    assert_eq!(generator.calls.lock().unwrap().len(), 4);
    let sizes: Vec<_> = state.groups().iter().map(|g| g.items.len()).collect();
    assert_eq!(sizes, vec![20, 10]);
    assert_eq!(state.error(), Some("quota exhausted"));
    assert_eq!(state.progress(), None);
    assert_eq!(
        sink.events.lock().unwrap().last(),
        Some(&RunEvent::ProgressCleared)
    );
}

#[tokio::test]
async fn parse_error_issues_no_requests() {
    let generator = Arc::new(CountingGenerator::default());
    let driver =
        RunDriver::new(Arc::new(RecordingSink::default())).with_generator(generator.clone());

    let state = driver
        .dispatch(AppState::new(), submit("https://a.example:alpha\nftp://b:beta", 10))
        .await;

    assert!(generator.calls.lock().unwrap().is_empty());
    assert!(state.error().unwrap().starts_with("line 2:"));
}

#[tokio::test]
async fn describe_effect_uses_the_describer() {
    let driver =
        RunDriver::new(Arc::new(RecordingSink::default())).with_describer(Arc::new(FixedDescriber));

    let state = driver
        .dispatch(
            AppState::new(),
            Msg::DescribeRequested {
                input: "\nhttps://acme.example:shoes\n".to_string(),
                language: None,
            },
        )
        .await;
    assert_eq!(state.description(), Some("About https://acme.example"));

    let state = driver
        .dispatch(
            state,
            Msg::DescribeRequested {
                input: "https://fail.example".to_string(),
                language: None,
            },
        )
        .await;
    assert_eq!(state.error(), Some("Connection timed out"));
    assert_eq!(state.session(), SessionState::Idle);
}

#[tokio::test]
async fn describe_without_describer_fails_gracefully() {
    let driver = RunDriver::new(Arc::new(RecordingSink::default()))
        .with_generator(Arc::new(CountingGenerator::default()));
    let state = driver
        .dispatch(
            AppState::new(),
            Msg::DescribeRequested {
                input: "https://acme.example:shoes".to_string(),
                language: None,
            },
        )
        .await;
    assert_eq!(state.error(), Some("no description service configured"));
}

#[tokio::test]
async fn generation_without_generator_aborts_the_run() {
    let sink = Arc::new(RecordingSink::default());
    let driver = RunDriver::new(sink.clone());

    let state = driver
        .dispatch(AppState::new(), submit("https://a.example:alpha", 10))
        .await;

    assert!(state.groups().is_empty());
    assert_eq!(state.error(), Some("no generation service configured"));
    assert_eq!(state.session(), SessionState::Idle);
}
