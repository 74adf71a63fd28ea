use std::path::PathBuf;

use backlink_core::{plain_text, ContentGroup};
use backlink_logging::backlink_info;
use chrono::NaiveDate;

use crate::persist::{ExportDir, PersistError};

const DOC_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  body { font-family: Arial, sans-serif; font-size: 12pt; line-height: 1.5; }
  .group-header { font-weight: bold; font-size: 14pt; margin-top: 20px; border-bottom: 2px solid #333; padding-bottom: 5px; }
  .group-type { font-size: 11pt; color: #666; margin-bottom: 15px; }
  .content-item { margin-bottom: 24px; }
  a { color: #0066cc; text-decoration: underline; }
</style>
</head>
<body>
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// HTML saved with a `.doc` extension so word processors open it with
    /// live links.
    Doc,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Doc => "doc",
            ExportFormat::Txt => "txt",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("backlinks_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// All groups as one HTML document, items kept as HTML so links survive.
pub fn render_grouped_document(groups: &[ContentGroup]) -> String {
    let mut html = String::from(DOC_HEAD);
    for (index, group) in groups.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"group-header\">{} - {}</div>",
            group.keyword, group.url
        ));
        html.push_str(&format!(
            "<div class=\"group-type\">Type: {}</div>",
            group.content_type.label()
        ));
        for item in &group.items {
            html.push_str(&format!("<div class=\"content-item\">{}</div>", item.content));
        }
        if index + 1 < groups.len() {
            html.push_str("<hr style=\"margin: 30px 0;\">");
        }
    }
    html.push_str("</body></html>");
    html
}

/// Every item as plain text, one blank line between items.
pub fn render_plain_text(groups: &[ContentGroup]) -> String {
    groups
        .iter()
        .flat_map(|group| group.items.iter())
        .map(|item| plain_text(&item.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Save the export for `groups` as that day's file in `dir`. Returns `None`
/// without touching the disk when there are no items.
pub fn write_export(
    dir: &ExportDir,
    groups: &[ContentGroup],
    format: ExportFormat,
    date: NaiveDate,
) -> Result<Option<PathBuf>, ExportError> {
    let item_count: usize = groups.iter().map(|group| group.items.len()).sum();
    if item_count == 0 {
        return Ok(None);
    }

    let content = match format {
        ExportFormat::Doc => render_grouped_document(groups),
        ExportFormat::Txt => render_plain_text(groups),
    };
    let path = dir.save(format, date, &content)?;
    backlink_info!(
        "exported {} items in {} groups to {}",
        item_count,
        groups.len(),
        path.display()
    );
    Ok(Some(path))
}
