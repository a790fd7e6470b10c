//! Metadata header block parsing.
//!
//! A header block sits at the very start of a document:
//!
//! ```text
//! ---
//! title: Python
//! priority: 160
//! ---
//! body...
//! ```
//!
//! Parsing is total: every input yields a [`HeaderParse`], and every failure
//! mode degrades to "field absent". Only a bounded prefix of the document is
//! inspected.

/// Line that opens and closes a header block.
const DELIMITER: &str = "---";

/// Maximum number of lines scanned for the closing delimiter.
pub const MAX_HEADER_LINES: usize = 64;

/// Maximum number of bytes scanned for the closing delimiter.
pub const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Fields extracted from a header block. `None` means absent or unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleHeader {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<u64>,
}

/// Outcome of scanning a document for a header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderParse {
    /// The document does not start with a delimiter line.
    Absent,
    /// An opening delimiter was found but no closing one within the bounded prefix.
    Unterminated,
    /// A complete block was found.
    Parsed(RuleHeader),
}

impl HeaderParse {
    /// Collapse to a header record, treating absent and unterminated blocks as empty.
    pub fn into_header(self) -> RuleHeader {
        match self {
            Self::Parsed(header) => header,
            Self::Absent | Self::Unterminated => RuleHeader::default(),
        }
    }
}

/// Scan `text` for a leading header block.
pub fn parse(text: &str) -> HeaderParse {
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    match lines.next() {
        Some(DELIMITER) => {}
        _ => return HeaderParse::Absent,
    }

    let mut header = RuleHeader::default();
    let mut consumed = DELIMITER.len() + 1;

    for line in lines.take(MAX_HEADER_LINES) {
        if line == DELIMITER {
            return HeaderParse::Parsed(header);
        }
        consumed += line.len() + 1;
        if consumed > MAX_HEADER_BYTES {
            break;
        }
        apply_field(&mut header, line);
    }

    HeaderParse::Unterminated
}

/// Record a `key: value` line into `header`. First occurrence of a key wins.
fn apply_field(header: &mut RuleHeader, line: &str) {
    let Some((key, value)) = line.split_once(':') else {
        return;
    };
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    match key.trim() {
        "title" if header.title.is_none() => header.title = Some(value.to_string()),
        "description" if header.description.is_none() => {
            header.description = Some(value.to_string())
        }
        "priority" if header.priority.is_none() => header.priority = Some(parse_priority(value)),
        _ => {}
    }
}

/// Read the leading run of ASCII digits. A value that does not start with a
/// digit (including a sign) claims the key and yields 0; a run too long for
/// `u64` saturates.
fn parse_priority(value: &str) -> u64 {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    match &value[..end] {
        "" => 0,
        digits => digits.parse().unwrap_or(u64::MAX),
    }
}
