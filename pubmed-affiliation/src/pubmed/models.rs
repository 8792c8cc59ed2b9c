use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Normalized metadata for one PubMed article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed ID (empty if the record carried none)
    pub pmid: String,
    pub title: String,
    /// `YYYY-MM-DD`, a partial date such as `2023--` or `2023`, or empty
    pub publication_date: String,
    /// Authors in listed order, each with their first affiliation only
    pub authors: Vec<Author>,
    /// Every distinct affiliation text across all authors
    pub affiliations: BTreeSet<String>,
    pub corresponding_email: Option<String>,
}

/// Author summary used for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub last_name: String,
    pub first_name: String,
    /// First listed affiliation, empty if none
    pub affiliation: String,
}

impl Author {
    /// "First Last", trimmed when either part is missing
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
