use crate::{FormSettings, GroupId, ItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted the URL:KEYWORD list together with the shared settings.
    GenerateSubmitted {
        input: String,
        settings: FormSettings,
    },
    /// The in-flight batch returned its items.
    BatchSucceeded { items: Vec<String> },
    /// The in-flight batch failed; the rest of the run is abandoned.
    BatchFailed { message: String },
    /// User asked for a description drafted from the first URL in `input`.
    DescribeRequested {
        input: String,
        language: Option<String>,
    },
    DescribeSucceeded { description: String },
    DescribeFailed { message: String },
    DeleteItem { item_id: ItemId },
    DeleteGroup { group_id: GroupId },
    ClearAll,
    GroupSelected { index: usize },
    NextGroup,
    PreviousGroup,
    ErrorDismissed,
}
