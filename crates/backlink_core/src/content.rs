use std::fmt;

/// Kind of backlink text the generator is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    Forum,
    #[default]
    Bio,
    Article,
    Social,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Forum,
        ContentType::Bio,
        ContentType::Article,
        ContentType::Social,
    ];

    /// Wire name, as sent in the `contentType` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Forum => "forum",
            ContentType::Bio => "bio",
            ContentType::Article => "article",
            ContentType::Social => "social",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Forum => "Forum / Comment Content",
            ContentType::Bio => "Profile / Bio Texts",
            ContentType::Article => "Article Paragraphs",
            ContentType::Social => "Social Media Posts",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human label for a raw wire content type; unknown types get a generic label.
pub fn content_type_label(value: &str) -> &'static str {
    ContentType::from_wire(value)
        .map(ContentType::label)
        .unwrap_or("Contents")
}

/// Settings shared by every pair of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub brand: String,
    pub description: String,
    pub language: String,
    pub content_type: ContentType,
    pub word_count: u32,
    pub total_count: u32,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            brand: String::new(),
            description: String::new(),
            language: "Türkçe".to_string(),
            content_type: ContentType::Bio,
            word_count: 100,
            total_count: 10,
        }
    }
}
