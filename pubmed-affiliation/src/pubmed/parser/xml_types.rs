//! Serde view of the parts of PubMed EFetch XML this crate reads
//!
//! Every element is optional: PubMed records are frequently incomplete and a
//! missing sub-element must never fail the whole batch.

use serde::Deserialize;

/// `<PubmedBookArticle>` entries may sit between articles; they are skipped
/// and the articles around them still collect into one list.
#[derive(Debug, Deserialize)]
#[serde(rename = "PubmedArticleSet")]
pub(super) struct PubmedArticleSet {
    #[serde(rename = "PubmedArticle", default)]
    pub articles: Vec<RawArticle>,
}

/// One `<PubmedArticle>` exactly as fetched, before normalization
///
/// Turn it into a [`PaperRecord`](crate::PaperRecord) with
/// [`extract_paper`](crate::pubmed::parser::extract_paper).
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    #[serde(rename = "MedlineCitation")]
    pub(crate) medline_citation: Option<MedlineCitation>,
}

impl RawArticle {
    /// PMID text, if the record has one
    pub fn pmid(&self) -> Option<&str> {
        self.medline_citation
            .as_ref()
            .and_then(|m| m.pmid.as_ref())
            .map(|p| p.value.trim())
            .filter(|p| !p.is_empty())
    }

    pub(crate) fn article(&self) -> Option<&Article> {
        self.medline_citation
            .as_ref()
            .and_then(|m| m.article.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MedlineCitation {
    #[serde(rename = "PMID")]
    pub pmid: Option<PmidXml>,
    #[serde(rename = "Article")]
    pub article: Option<Article>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PmidXml {
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Article {
    #[serde(rename = "Journal")]
    pub journal: Option<Journal>,
    #[serde(rename = "ArticleTitle")]
    pub article_title: Option<String>,
    #[serde(rename = "AuthorList")]
    pub author_list: Option<AuthorList>,
    #[serde(rename = "ArticleDate", default)]
    pub article_dates: Vec<DateXml>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Journal {
    #[serde(rename = "JournalIssue")]
    pub journal_issue: Option<JournalIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JournalIssue {
    #[serde(rename = "PubDate")]
    pub pub_date: Option<DateXml>,
}

/// Shared shape of `<ArticleDate>` and `<PubDate>`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DateXml {
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Month")]
    pub month: Option<String>,
    #[serde(rename = "Day")]
    pub day: Option<String>,
}

impl DateXml {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthorList {
    #[serde(rename = "Author", default)]
    pub authors: Vec<AuthorXml>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthorXml {
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "ForeName")]
    pub fore_name: Option<String>,
    #[serde(rename = "AffiliationInfo", default)]
    pub affiliation_info: Vec<AffiliationInfo>,
}

impl AuthorXml {
    /// Affiliation texts in listed order, skipping entries without one
    pub fn affiliation_texts(&self) -> impl Iterator<Item = &str> {
        self.affiliation_info
            .iter()
            .filter_map(|info| info.affiliation.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AffiliationInfo {
    #[serde(rename = "Affiliation")]
    pub affiliation: Option<String>,
}
