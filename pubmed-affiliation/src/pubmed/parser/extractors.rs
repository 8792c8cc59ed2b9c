//! Normalization of raw records into [`PaperRecord`]s
//!
//! Nothing here fails: absent or malformed sub-fields become empty strings,
//! empty collections or `None`.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use super::xml_types::{Article, RawArticle};
use crate::pubmed::models::{Author, PaperRecord};

/// Normalize one fetched record
pub fn extract_paper(raw: &RawArticle) -> PaperRecord {
    let pmid = match raw.pmid() {
        Some(pmid) => pmid.to_string(),
        None => {
            warn!("Record without PMID, keeping it with an empty identifier");
            String::new()
        }
    };

    let Some(article) = raw.article() else {
        warn!(pmid = %pmid, "Record without Article element");
        return PaperRecord {
            pmid,
            title: String::new(),
            publication_date: String::new(),
            authors: Vec::new(),
            affiliations: BTreeSet::new(),
            corresponding_email: None,
        };
    };

    let title = article.article_title.clone().unwrap_or_default();
    if title.is_empty() {
        debug!(pmid = %pmid, "Record without ArticleTitle");
    }

    let paper = PaperRecord {
        publication_date: extract_publication_date(article),
        authors: extract_authors(article),
        affiliations: extract_affiliations(article),
        corresponding_email: extract_corresponding_email(article),
        pmid,
        title,
    };

    debug!(
        pmid = %paper.pmid,
        authors = paper.authors.len(),
        affiliations = paper.affiliations.len(),
        has_email = paper.corresponding_email.is_some(),
        "Extracted paper"
    );

    paper
}

/// `Year-Month-Day` from the first ArticleDate, else the journal issue year
pub(crate) fn extract_publication_date(article: &Article) -> String {
    if let Some(date) = article.article_dates.first().filter(|d| !d.is_empty()) {
        return format!(
            "{}-{}-{}",
            date.year.as_deref().unwrap_or_default(),
            date.month.as_deref().unwrap_or_default(),
            date.day.as_deref().unwrap_or_default()
        );
    }

    article
        .journal
        .as_ref()
        .and_then(|j| j.journal_issue.as_ref())
        .and_then(|ji| ji.pub_date.as_ref())
        .and_then(|pd| pd.year.clone())
        .unwrap_or_default()
}

/// One [`Author`] per listed author, keeping only the first affiliation
pub(crate) fn extract_authors(article: &Article) -> Vec<Author> {
    let Some(list) = &article.author_list else {
        return Vec::new();
    };

    list.authors
        .iter()
        .map(|author| Author {
            last_name: author.last_name.clone().unwrap_or_default(),
            first_name: author.fore_name.clone().unwrap_or_default(),
            affiliation: author
                .affiliation_info
                .first()
                .and_then(|info| info.affiliation.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Every distinct affiliation of every author
pub(crate) fn extract_affiliations(article: &Article) -> BTreeSet<String> {
    article
        .author_list
        .iter()
        .flat_map(|list| list.authors.iter())
        .flat_map(|author| author.affiliation_texts())
        .map(str::to_string)
        .collect()
}

/// First email found in any author's affiliation texts
pub(crate) fn extract_corresponding_email(article: &Article) -> Option<String> {
    article
        .author_list
        .iter()
        .flat_map(|list| list.authors.iter())
        .flat_map(|author| author.affiliation_texts())
        .find_map(extract_email)
}

/// Pull an email address out of one affiliation text
///
/// Only texts mentioning `@` or "email" are pattern-matched at all.
///
/// ```
/// use pubmed_affiliation::pubmed::parser::extract_email;
///
/// assert_eq!(
///     extract_email("Dept, contact: jane.doe@biotech.com").as_deref(),
///     Some("jane.doe@biotech.com")
/// );
/// assert_eq!(extract_email("Pfizer Inc., New York"), None);
/// ```
pub fn extract_email(text: &str) -> Option<String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

    if !text.contains('@') && !text.to_lowercase().contains("email") {
        return None;
    }

    let re = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Failed to compile email regex"));

    re.find(text).map(|m| m.as_str().to_string())
}
