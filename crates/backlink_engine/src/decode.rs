use std::sync::LazyLock;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use regex::bytes::Regex;

/// Page text decoded to UTF-8, plus the encoding that was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
}

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#)
        .expect("valid meta charset regex")
});

/// How far into the document a `<meta charset>` is looked for.
const META_SNIFF_BYTES: usize = 4096;

/// Decode raw page bytes, trying in order: BOM, Content-Type charset,
/// `<meta charset>` in the head, then chardetng detection.
///
/// Malformed sequences are replaced rather than rejected; scraped pages are
/// frequently mislabelled and a best-effort digest is all that is needed.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let declared = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(bytes));
    if let Some(encoding) = declared.and_then(|label| Encoding::for_label(label.as_bytes())) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn charset_from_meta(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|label| String::from_utf8_lossy(label.as_bytes()).into_owned())
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedPage {
    let (text, used, _had_errors) = encoding.decode(bytes);
    DecodedPage {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
    }
}
