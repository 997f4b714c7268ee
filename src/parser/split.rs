use std::sync::OnceLock;

use log::trace;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{err, ErrorKind, Result};

/// Replaces a separator once its position is known to be unambiguous.
/// Never appears in a valid local-part, domain or display name.
const TOKEN: &str = "<|>";

/// The tail of an entry (`@domain` with an optional `>`) followed by its separator.
const TAIL_DELIMITER: &str = r"(@.*?>?)\s*[,;]";
const TRAILING_TOKEN: &str = r"<\|>$";
const TOKEN_DELIMITER: &str = r"\s*<\|>\s*";

static TAIL_DELIMITER_REGEX: OnceLock<Regex> = OnceLock::new();
static TRAILING_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
static TOKEN_DELIMITER_REGEX: OnceLock<Regex> = OnceLock::new();

/// How an address list is cut into entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplitStrategy {
    /// Only split where a separator directly follows the tail of an address (`...@domain>,`).
    ///
    /// A display name that itself ends in `name@domain>` right before a real separator is
    /// ambiguous for this strategy and is left as is.
    #[default]
    TailHeuristic,
    /// Scan left to right, tracking quotes, angle brackets and comments. A separator only
    /// counts at nesting depth zero, after the current entry has shown an `@`.
    Scanner,
}

/// Splits a list of addresses, each optionally carrying a display name, into its entries.
///
/// Commas and semicolons are both accepted as separators, also mixed in one list. A separator
/// inside a display name such as `Doe, Jane <jane@example.com>` does not split the entry.
///
/// Fails with [`ErrorKind::InvalidArgument`] when the list is empty, only whitespace or only
/// separators.
pub fn split_address_list<L: AsRef<str>>(list: L) -> Result<Vec<String>> {
    split_address_list_with(list, SplitStrategy::default())
}

/// Like [`split_address_list`], with an explicit [`SplitStrategy`].
///
/// ```
/// use mail_recipients::parser::{split_address_list_with, SplitStrategy};
///
/// let entries = split_address_list_with(
///     r#""Doe, J. (x@y.com)" <j@x.com>; k@y.com"#,
///     SplitStrategy::Scanner,
/// )
/// .unwrap();
///
/// assert_eq!(entries, vec![r#""Doe, J. (x@y.com)" <j@x.com>"#, "k@y.com"]);
/// ```
pub fn split_address_list_with<L: AsRef<str>>(
    list: L,
    strategy: SplitStrategy,
) -> Result<Vec<String>> {
    let list = list.as_ref().trim();

    if list.is_empty() {
        err!(
            ErrorKind::InvalidArgument,
            "Address list must contain at least one address"
        );
    }

    let entries = match strategy {
        SplitStrategy::TailHeuristic => split_on_tails(list)?,
        SplitStrategy::Scanner => split_with_scanner(list),
    };

    if entries.is_empty() {
        err!(
            ErrorKind::InvalidArgument,
            "Address list '{}' holds no address entries",
            list
        );
    }

    trace!("Split address list into {} entries", entries.len());

    Ok(entries)
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex> {
    if let Some(regex) = cell.get() {
        return Ok(regex);
    }

    let regex = Regex::new(pattern)?;

    Ok(cell.get_or_init(|| regex))
}

fn split_on_tails(list: &str) -> Result<Vec<String>> {
    let tail_delimiter = compiled(&TAIL_DELIMITER_REGEX, TAIL_DELIMITER)?;
    let trailing_token = compiled(&TRAILING_TOKEN_REGEX, TRAILING_TOKEN)?;
    let token_delimiter = compiled(&TOKEN_DELIMITER_REGEX, TOKEN_DELIMITER)?;

    let unambiguous = tail_delimiter.replace_all(list, format!("${{1}}{}", TOKEN).as_str());
    let without_trailing = trailing_token.replace(unambiguous.trim_end(), "");

    Ok(token_delimiter
        .split(&without_trailing)
        .filter_map(clean_entry)
        .collect())
}

fn split_with_scanner(list: &str) -> Vec<String> {
    let mut scanner = Scanner::default();
    let mut entries = Vec::new();
    let mut current = String::new();

    for ch in list.chars() {
        if scanner.is_separator(ch) {
            entries.extend(clean_entry(&current));
            current.clear();
        } else {
            current.push(ch);
        }
    }

    entries.extend(clean_entry(&current));

    entries
}

/// Trims whitespace and stray separators, dropping fragments left empty.
fn clean_entry(fragment: &str) -> Option<String> {
    let entry = fragment.trim_matches(|c: char| c.is_whitespace() || c == ',' || c == ';');

    if entry.is_empty() {
        None
    } else {
        Some(entry.to_string())
    }
}

#[derive(Debug, Default)]
struct Scanner {
    quoted: bool,
    escaped: bool,
    angle_depth: usize,
    comment_depth: usize,
    seen_at: bool,
}

impl Scanner {
    fn is_separator(&mut self, ch: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }

        match ch {
            '\\' if self.quoted || self.comment_depth > 0 => self.escaped = true,
            '"' if self.comment_depth == 0 => self.quoted = !self.quoted,
            _ if self.quoted => {}
            '(' => self.comment_depth += 1,
            ')' if self.comment_depth > 0 => self.comment_depth -= 1,
            _ if self.comment_depth > 0 => {}
            '<' => self.angle_depth += 1,
            '>' if self.angle_depth > 0 => self.angle_depth -= 1,
            '@' => self.seen_at = true,
            ',' | ';' if self.angle_depth == 0 && self.seen_at => {
                *self = Scanner::default();
                return true;
            }
            _ => {}
        }

        false
    }
}
