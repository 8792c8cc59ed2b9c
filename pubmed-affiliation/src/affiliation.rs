//! Lexical company/non-company classification of affiliation strings
//!
//! An affiliation is checked against two keyword lists with case-insensitive
//! substring matching. Academic and governmental markers are checked first and
//! win over corporate markers, so "University Hospital Pharma Partnership" is
//! not a company. Anything matching neither list is not a company either.
//!
//! The lists are plain data ([`KeywordLists`]) and can be replaced from a YAML
//! document:
//!
//! ```yaml
//! company: [Inc, Ltd, GmbH, Pharma]
//! non_company: [University, Hospital]
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PubMedError, Result};

/// Corporate and industry markers
pub const DEFAULT_COMPANY_KEYWORDS: &[&str] = &[
    "Inc",
    "Ltd",
    "LLC",
    "Corporation",
    "Corp",
    "GmbH",
    "Pharma",
    "Biotech",
    "Therapeutics",
    "Company",
    "Co",
    "Pharmaceuticals",
    "Biotechnology",
    "Biosciences",
    "Labs",
    "Laboratories",
    "Technologies",
];

/// Academic, clinical and governmental markers
pub const DEFAULT_NON_COMPANY_KEYWORDS: &[&str] = &[
    "University",
    "Institute",
    "College",
    "School",
    "Hospital",
    "Medical Center",
    "Clinic",
    "Foundation",
    "Research Center",
    "Academy",
    "Department of",
    "Ministry of",
    "National",
    "Federal",
];

/// The two ordered keyword lists used by [`AffiliationClassifier`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLists {
    #[serde(default = "default_company_keywords")]
    pub company: Vec<String>,
    #[serde(default = "default_non_company_keywords")]
    pub non_company: Vec<String>,
}

impl KeywordLists {
    /// Parse keyword lists from YAML; a missing list keeps its default
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| PubMedError::configuration(format!("Invalid keyword file: {}", e)))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PubMedError::configuration(format!(
                "Failed to read keyword file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self {
            company: default_company_keywords(),
            non_company: default_non_company_keywords(),
        }
    }
}

fn default_company_keywords() -> Vec<String> {
    DEFAULT_COMPANY_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_non_company_keywords() -> Vec<String> {
    DEFAULT_NON_COMPANY_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}

/// Verdict for one affiliation, with the keyword that decided it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Matched a non-company keyword (checked first)
    NonCompany(&'a str),
    /// Matched a company keyword and no non-company keyword
    Company(&'a str),
    /// Matched neither list
    Unmatched,
}

impl Classification<'_> {
    pub fn is_company(&self) -> bool {
        matches!(self, Classification::Company(_))
    }
}

impl fmt::Display for Classification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::NonCompany(keyword) => write!(f, "non-company ({})", keyword),
            Classification::Company(keyword) => write!(f, "company ({})", keyword),
            Classification::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Keyword-driven affiliation classifier
///
/// # Example
///
/// ```
/// use pubmed_affiliation::AffiliationClassifier;
///
/// let classifier = AffiliationClassifier::default();
/// assert!(classifier.classify("Pfizer Inc., New York, USA"));
/// assert!(!classifier.classify("Harvard University"));
/// // Non-company keywords take precedence
/// assert!(!classifier.classify("University Hospital Pharma Partnership"));
/// ```
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    company: Vec<String>,
    non_company: Vec<String>,
}

impl AffiliationClassifier {
    /// Build a classifier from keyword lists, normalizing them to uppercase
    ///
    /// Blank keywords are rejected since they would match every affiliation.
    pub fn new(lists: KeywordLists) -> Result<Self> {
        Ok(Self {
            company: normalize(lists.company, "company")?,
            non_company: normalize(lists.non_company, "non_company")?,
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(KeywordLists::from_yaml_file(path)?)
    }

    /// Normalized company keywords, in match order
    pub fn company_keywords(&self) -> &[String] {
        &self.company
    }

    /// Normalized non-company keywords, in match order
    pub fn non_company_keywords(&self) -> &[String] {
        &self.non_company
    }

    /// Classify an affiliation and report which keyword decided it
    pub fn explain(&self, affiliation: &str) -> Classification<'_> {
        let upper = affiliation.to_uppercase();

        if let Some(keyword) = self.non_company.iter().find(|k| upper.contains(k.as_str())) {
            return Classification::NonCompany(keyword);
        }

        if let Some(keyword) = self.company.iter().find(|k| upper.contains(k.as_str())) {
            return Classification::Company(keyword);
        }

        Classification::Unmatched
    }

    /// `true` if the affiliation looks like a company
    pub fn classify(&self, affiliation: &str) -> bool {
        self.explain(affiliation).is_company()
    }
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY_KEYWORDS
                .iter()
                .map(|k| k.to_uppercase())
                .collect(),
            non_company: DEFAULT_NON_COMPANY_KEYWORDS
                .iter()
                .map(|k| k.to_uppercase())
                .collect(),
        }
    }
}

fn normalize(keywords: Vec<String>, list: &str) -> Result<Vec<String>> {
    keywords
        .into_iter()
        .map(|keyword| {
            if keyword.trim().is_empty() {
                Err(PubMedError::configuration(format!(
                    "Empty keyword in {} list",
                    list
                )))
            } else {
                Ok(keyword.to_uppercase())
            }
        })
        .collect()
}

/// Classify with the default keyword lists
pub fn is_company_affiliated(affiliation: &str) -> bool {
    AffiliationClassifier::default().classify(affiliation)
}
