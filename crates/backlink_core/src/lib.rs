//! Backlink core: pure session state machine and the text rules it relies on.
mod content;
mod effect;
mod group;
mod items;
mod link;
mod msg;
mod parse;
mod plan;
mod request;
mod state;
mod update;
mod view_model;

pub use content::{content_type_label, ContentType, FormSettings};
pub use effect::Effect;
pub use group::{ContentGroup, ContentItem, GroupId, GroupStore, ItemId};
pub use items::{plain_text, split_generated_items};
pub use link::link_keyword;
pub use msg::Msg;
pub use parse::{
    extract_url, parse_line, parse_line_lenient, parse_lines, LineError, ParseError,
    UrlKeywordPair, EXPECTED_FORMAT,
};
pub use plan::{batch_count, batch_sizes, BatchIntent, BatchPlan, RunProgress, BATCH_SIZE};
pub use request::BatchRequest;
pub use state::{AppState, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, GroupRowView};
