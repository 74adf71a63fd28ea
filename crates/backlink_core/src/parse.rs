/// Example line shown to users whenever a line is rejected.
pub const EXPECTED_FORMAT: &str = "https://example.com:anchor keyword";

/// A validated target URL and the anchor keyword that should link to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlKeywordPair {
    pub url: String,
    pub keyword: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected URL:KEYWORD")]
    MalformedLine,
    #[error("url must start with http:// or https://")]
    InvalidProtocol,
    #[error("no keyword after the url")]
    MissingKeyword,
    #[error("keyword is empty")]
    EmptyKeyword,
    #[error("url is empty")]
    EmptyUrl,
}

/// A rejected line in a multi-line list; `line_number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("line {line_number}: {kind} (expected format: {expected})", expected = EXPECTED_FORMAT)]
pub struct LineError {
    pub line_number: usize,
    pub kind: ParseError,
}

/// Strict parse used on submit.
///
/// The protocol is everything before the first `:` and must be exactly
/// `http` or `https`. The keyword is everything after the *last* `:`, so
/// ports survive (`https://a.b:8080/x:kw`), but keywords can never contain
/// a colon.
pub fn parse_line(raw: &str) -> Result<UrlKeywordPair, ParseError> {
    let (protocol, rest) = split_protocol(raw)?;
    if protocol != "http" && protocol != "https" {
        return Err(ParseError::InvalidProtocol);
    }

    let Some((url_part, keyword_part)) = rest.rsplit_once(':') else {
        return Err(ParseError::MissingKeyword);
    };

    let keyword = keyword_part.trim();
    let url = format!("{protocol}:{url_part}");
    if keyword.is_empty() {
        return Err(ParseError::EmptyKeyword);
    }
    if url.is_empty() {
        return Err(ParseError::EmptyUrl);
    }

    Ok(UrlKeywordPair {
        url,
        keyword: keyword.to_string(),
    })
}

/// Lenient parse used by the auto-describe path.
///
/// Differs from [`parse_line`] on purpose: the protocol is lower-cased before
/// the check, and a line without a keyword separator yields the whole
/// remainder as the URL with an empty keyword.
pub fn parse_line_lenient(raw: &str) -> Result<UrlKeywordPair, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::MalformedLine);
    }
    let (protocol, rest) = split_protocol(raw)?;
    let protocol = protocol.to_lowercase();
    if protocol != "http" && protocol != "https" {
        return Err(ParseError::InvalidProtocol);
    }

    let pair = match rest.rsplit_once(':') {
        None => UrlKeywordPair {
            url: format!("{protocol}:{rest}").trim().to_string(),
            keyword: String::new(),
        },
        Some((url_part, keyword_part)) => UrlKeywordPair {
            url: format!("{protocol}:{url_part}").trim().to_string(),
            keyword: keyword_part.trim().to_string(),
        },
    };
    Ok(pair)
}

/// URL of the first non-blank line, parsed leniently.
pub fn extract_url(input: &str) -> Option<String> {
    let line = input.lines().find(|line| !line.trim().is_empty())?;
    parse_line_lenient(line)
        .ok()
        .map(|pair| pair.url)
        .filter(|url| !url.is_empty())
}

/// Parse a whole list. Blank lines are skipped; the first bad line aborts.
pub fn parse_lines(input: &str) -> Result<Vec<UrlKeywordPair>, LineError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_line(line).map_err(|kind| LineError {
                line_number: index + 1,
                kind,
            })
        })
        .collect()
}

fn split_protocol(raw: &str) -> Result<(&str, &str), ParseError> {
    raw.split_once(':').ok_or(ParseError::MalformedLine)
}
