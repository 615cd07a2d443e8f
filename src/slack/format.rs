//! Message formatting: input dialects to Slack mrkdwn
//!
//! Each dialect is an explicit, ordered table of (pattern, replacement)
//! pairs. The markdown rules use distinct delimiter pairs and cannot match
//! overlapping spans, so their relative order does not matter. The HTML
//! rules are order-sensitive: recognized tags are rewritten first, then a
//! catch-all pass strips whatever tags remain.
//!
//! Formatting is total. Malformed or unterminated markup simply fails to
//! match and passes through unchanged; formatting is never the reason a
//! request fails.

use regex::Regex;

use crate::types::Dialect;

lazy_static::lazy_static! {
    /// Markdown emphasis markers to their Slack equivalents. Non-greedy so
    /// adjacent runs on the same line do not merge.
    static ref MARKDOWN_RULES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"\*\*(.+?)\*\*").unwrap(), "*$1*"),
        // The group must be braced: in a replacement string `$1_` is read
        // as a group named "1_" (underscore is a name character) and
        // expands to nothing.
        (Regex::new(r"__(.+?)__").unwrap(), "_${1}_"),
        (Regex::new(r"~~(.+?)~~").unwrap(), "~$1~"),
    ];

    /// HTML to mrkdwn, applied top to bottom. Block-level tags become
    /// newlines, recognized inline tags become their mrkdwn wrappers, and
    /// the final rule strips any tag that had no specific mapping.
    static ref HTML_RULES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)<br\s*/?>").unwrap(), "\n"),
        (Regex::new(r"(?i)</?p>").unwrap(), "\n"),
        (Regex::new(r"(?is)<strong>(.*?)</strong>").unwrap(), "*$1*"),
        (Regex::new(r"(?is)<b>(.*?)</b>").unwrap(), "*$1*"),
        // Braced for the same reason as the markdown italic rule
        (Regex::new(r"(?is)<em>(.*?)</em>").unwrap(), "_${1}_"),
        (Regex::new(r"(?is)<i>(.*?)</i>").unwrap(), "_${1}_"),
        (Regex::new(r"(?is)<code>(.*?)</code>").unwrap(), "`$1`"),
        (Regex::new(r"(?is)<del>(.*?)</del>").unwrap(), "~$1~"),
        (Regex::new(r"<[^>]*>").unwrap(), ""),
    ];
}

fn apply_rules(body: &str, rules: &[(Regex, &str)]) -> String {
    let mut text = body.to_string();
    for (pattern, replacement) in rules {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text
}

/// Convert a message body from its declared dialect to Slack mrkdwn.
///
/// `Native` and `Plain` are identity at the text level; `Plain` additionally
/// disables markdown rendering via [`Dialect::mrkdwn_enabled`], which is a
/// payload flag rather than a text transform. Unknown dialect tags never
/// reach here: [`Dialect::from_tag`] maps them to `Native`.
///
/// There is no escaping mechanism: literal `**` inside a code span is still
/// rewritten. This matches the upstream contract as shipped.
pub fn format_message(body: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Native | Dialect::Plain => body.to_string(),
        Dialect::Markdown => apply_rules(body, &MARKDOWN_RULES),
        Dialect::Html => apply_rules(body, &HTML_RULES),
    }
}
