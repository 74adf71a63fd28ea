use std::path::PathBuf;

use backlink_core::{ContentType, FormSettings};
use backlink_engine::ExportFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "backlink", version, about = "SEO backlink content generator")]
pub struct Cli {
    /// Where log lines go.
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal, global = true)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API (`POST /generate`, `POST /describe`).
    Serve {
        /// Overrides BACKLINK_HOST.
        #[arg(long)]
        host: Option<String>,
        /// Overrides BACKLINK_PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate content for every URL:KEYWORD line and export it.
    Generate(GenerateArgs),
    /// Draft a business description for the first URL in the input.
    Describe(DescribeArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// File with one `https://site.example:keyword` per line; `-` reads stdin.
    #[arg(short, long, default_value = "-")]
    pub input: String,

    #[arg(long, default_value = "")]
    pub brand: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "Türkçe")]
    pub language: String,

    #[arg(long = "type", value_enum, default_value_t = ContentTypeArg::Bio)]
    pub content_type: ContentTypeArg,

    #[arg(long, default_value_t = 100)]
    pub word_count: u32,

    /// Items to generate per line.
    #[arg(long, default_value_t = 10)]
    pub total: u32,

    /// Use a running backlink server instead of calling the model directly.
    #[arg(long)]
    pub server: Option<String>,

    #[arg(long, value_enum, default_value_t = FormatArg::Doc)]
    pub format: FormatArg,

    /// Directory the export file is written to.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

impl GenerateArgs {
    pub fn form_settings(&self) -> FormSettings {
        FormSettings {
            brand: self.brand.clone(),
            description: self.description.clone(),
            language: self.language.clone(),
            content_type: self.content_type.into(),
            word_count: self.word_count,
            total_count: self.total,
        }
    }
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// A URL, or URL:KEYWORD lines; the first non-blank line is used.
    pub input: String,

    /// Language name for the description; defaults to Turkish.
    #[arg(long)]
    pub language: Option<String>,

    /// Print the page digest instead of asking the model.
    #[arg(long, conflicts_with = "server")]
    pub digest_only: bool,

    #[arg(long)]
    pub server: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentTypeArg {
    Forum,
    Bio,
    Article,
    Social,
}

impl From<ContentTypeArg> for ContentType {
    fn from(value: ContentTypeArg) -> Self {
        match value {
            ContentTypeArg::Forum => ContentType::Forum,
            ContentTypeArg::Bio => ContentType::Bio,
            ContentTypeArg::Article => ContentType::Article,
            ContentTypeArg::Social => ContentType::Social,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Grouped HTML document saved as `.doc`.
    Doc,
    /// Plain text, items separated by blank lines.
    Txt,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Doc => ExportFormat::Doc,
            FormatArg::Txt => ExportFormat::Txt,
        }
    }
}
