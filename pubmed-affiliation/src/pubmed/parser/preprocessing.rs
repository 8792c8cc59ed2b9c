//! XML cleaning applied before deserialization

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Strip inline formatting tags from XML content
///
/// Tags like `<i>`, `<sup>` and `<sub>` appear inside `ArticleTitle` and
/// `Affiliation` text and break quick-xml's serde deserializer, which expects
/// plain text there.
///
/// ```ignore
/// let xml = "<ArticleTitle>CO<sub>2</sub> levels</ArticleTitle>";
/// assert_eq!(strip_inline_html_tags(xml), "<ArticleTitle>CO2 levels</ArticleTitle>");
/// ```
pub(crate) fn strip_inline_html_tags(xml: &str) -> String {
    static INLINE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|em|strong|italic|bold)>")
            .expect("Failed to compile inline tag regex")
    });

    let cleaned = re.replace_all(xml, "");

    if cleaned.len() != xml.len() {
        debug!(
            original_bytes = xml.len(),
            cleaned_bytes = cleaned.len(),
            "Stripped inline HTML tags"
        );
    }

    cleaned.into_owned()
}
