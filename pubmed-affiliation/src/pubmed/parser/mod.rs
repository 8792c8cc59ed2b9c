//! PubMed EFetch XML parsing
//!
//! Parsing happens in two steps. [`parse_articles_from_xml`] deserializes the
//! response body into [`RawArticle`]s and is the only step that can fail (the
//! body is not the XML we asked for). [`extract_paper`] then normalizes each
//! raw record into a [`PaperRecord`](crate::PaperRecord) and never fails.
//!
//! # Module Organization
//!
//! - `preprocessing` - XML cleaning before deserialization
//! - `xml_types` - serde view of the EFetch schema
//! - `extractors` - raw record to `PaperRecord` normalization

mod extractors;
mod preprocessing;
mod xml_types;

pub use extractors::{extract_email, extract_paper};
pub use xml_types::RawArticle;

use quick_xml::de::from_str;
use tracing::{debug, instrument};

use crate::error::{RemoteServiceError, Result};
use preprocessing::strip_inline_html_tags;
use xml_types::PubmedArticleSet;

/// Parse every `<PubmedArticle>` in an EFetch XML response
///
/// # Errors
///
/// Returns a remote service error if the body is not a `PubmedArticleSet`
/// document.
///
/// # Example
///
/// ```
/// use pubmed_affiliation::pubmed::parser::{extract_paper, parse_articles_from_xml};
///
/// let xml = r#"<?xml version="1.0"?>
/// <PubmedArticleSet>
///   <PubmedArticle>
///     <MedlineCitation>
///       <PMID>12345678</PMID>
///       <Article><ArticleTitle>Example Article</ArticleTitle></Article>
///     </MedlineCitation>
///   </PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let raw = parse_articles_from_xml(xml)?;
/// let paper = extract_paper(&raw[0]);
/// assert_eq!(paper.title, "Example Article");
/// # Ok::<(), pubmed_affiliation::PubMedError>(())
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_articles_from_xml(xml: &str) -> Result<Vec<RawArticle>> {
    let cleaned_xml = strip_inline_html_tags(xml);

    let article_set: PubmedArticleSet = from_str(&cleaned_xml).map_err(|e| {
        RemoteServiceError::Xml(format!("Failed to deserialize EFetch XML: {}", e))
    })?;

    debug!(articles = article_set.articles.len(), "Parsed EFetch XML");
    Ok(article_set.articles)
}
