use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use backlink_core::{extract_url, AppState, Msg, EXPECTED_FORMAT};
use backlink_engine::{
    write_export, BatchGenerator, ChatClient, DeepSeekClient, DescribeService, DescribeSettings,
    Describer, DigestSettings, ExportDir, FetchSettings, GenerateService, GenerateSettings,
    PageDigester, ProgressSink, RegexTextExtractor, RemoteClient, ReqwestFetcher, RunDriver,
    RunEvent,
};
use backlink_logging::{backlink_info, backlink_warn};
use chrono::Local;

use crate::cli::{DescribeArgs, GenerateArgs};
use crate::config::AppConfig;
use crate::server::{self, ServerState};

/// A whole batch of long-form text can take minutes.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(300);

/// Logs run progress as it happens.
struct LogProgress;

impl ProgressSink for LogProgress {
    fn emit(&self, event: RunEvent) {
        match event {
            RunEvent::Progress(p) => backlink_info!(
                "pair {}/{} '{}': {}/{} done",
                p.current_pair_index,
                p.total_pairs,
                p.current_keyword,
                p.completed,
                p.total
            ),
            RunEvent::ProgressCleared => backlink_info!("run finished"),
        }
    }
}

fn chat_client(config: &AppConfig) -> Result<Arc<dyn ChatClient>> {
    Ok(Arc::new(DeepSeekClient::new(config.chat_settings()?)?))
}

fn describe_service(chat: Arc<dyn ChatClient>) -> DescribeService {
    DescribeService::new(
        Arc::new(ReqwestFetcher::new(FetchSettings::default())),
        Arc::new(RegexTextExtractor),
        chat,
        DescribeSettings::default(),
    )
}

pub async fn serve(config: &AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let chat = chat_client(config)?;
    let state = ServerState {
        generator: Arc::new(GenerateService::new(chat.clone(), GenerateSettings::default())),
        describer: Arc::new(describe_service(chat)),
    };
    let host = host.unwrap_or_else(|| config.host.clone());
    let port = port.unwrap_or(config.port);
    server::serve(Arc::new(state), &host, port).await
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading URL:KEYWORD lines from stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(source).with_context(|| format!("reading {source}"))
}

pub async fn generate(config: &AppConfig, args: GenerateArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let generator: Arc<dyn BatchGenerator> = match &args.server {
        Some(url) => Arc::new(RemoteClient::new(url.clone(), REMOTE_TIMEOUT)?),
        None => Arc::new(GenerateService::new(
            chat_client(config)?,
            GenerateSettings::default(),
        )),
    };

    let driver = RunDriver::new(Arc::new(LogProgress)).with_generator(generator);
    let state = driver
        .dispatch(
            AppState::new(),
            Msg::GenerateSubmitted {
                input,
                settings: args.form_settings(),
            },
        )
        .await;

    let view = state.view();
    for group in &view.groups {
        println!(
            "{} - {} [{}]: {} items",
            group.keyword, group.url, group.label, group.item_count
        );
    }
    println!("total: {} items in {} groups", view.total_items, view.groups.len());

    // Whatever finished before a failure is still worth keeping.
    let exports = ExportDir::new(args.out.clone());
    let today = Local::now().date_naive();
    match write_export(&exports, state.groups(), args.format.into(), today)? {
        Some(path) => println!("exported to {}", path.display()),
        None => backlink_warn!("nothing generated, no export written"),
    }

    if let Some(error) = state.error() {
        bail!("{error}");
    }
    Ok(())
}

pub async fn describe(config: &AppConfig, args: DescribeArgs) -> Result<()> {
    if args.digest_only {
        let Some(url) = extract_url(&args.input) else {
            bail!("enter a valid URL first (example: {EXPECTED_FORMAT})");
        };
        let digester = PageDigester::new(
            Arc::new(ReqwestFetcher::new(FetchSettings::default())),
            Arc::new(RegexTextExtractor),
            DigestSettings::default(),
        );
        let digest = digester.digest(&url).await?;
        println!("{digest}");
        return Ok(());
    }

    let describer: Arc<dyn Describer> = match &args.server {
        Some(url) => Arc::new(RemoteClient::new(url.clone(), REMOTE_TIMEOUT)?),
        None => Arc::new(describe_service(chat_client(config)?)),
    };
    let driver = RunDriver::new(Arc::new(LogProgress)).with_describer(describer);

    let state = driver
        .dispatch(
            AppState::new(),
            Msg::DescribeRequested {
                input: args.input,
                language: args.language,
            },
        )
        .await;

    match (state.description(), state.error()) {
        (Some(description), _) => {
            println!("{description}");
            Ok(())
        }
        (None, Some(error)) => bail!("{error}"),
        (None, None) => bail!("no description produced"),
    }
}
