//! Company-affiliation threshold filtering

use tracing::{debug, trace};

use crate::affiliation::AffiliationClassifier;
use crate::pubmed::models::PaperRecord;
use crate::pubmed::parser::{RawArticle, extract_paper};

/// Keeps papers with at least `min_companies` company affiliations
///
/// Counting runs over the record-level affiliation set, so an author listing
/// both a university and a company contributes the company even when the
/// university is listed first.
#[derive(Debug, Clone)]
pub struct PaperFilter {
    classifier: AffiliationClassifier,
    min_companies: usize,
}

impl PaperFilter {
    pub fn new(classifier: AffiliationClassifier, min_companies: usize) -> Self {
        Self {
            classifier,
            min_companies,
        }
    }

    pub fn with_min_companies(mut self, min_companies: usize) -> Self {
        self.min_companies = min_companies;
        self
    }

    pub fn min_companies(&self) -> usize {
        self.min_companies
    }

    pub fn classifier(&self) -> &AffiliationClassifier {
        &self.classifier
    }

    /// Number of the paper's distinct affiliations classified as companies
    pub fn company_count(&self, paper: &PaperRecord) -> usize {
        paper
            .affiliations
            .iter()
            .filter(|affiliation| {
                let verdict = self.classifier.explain(affiliation);
                trace!(pmid = %paper.pmid, affiliation = %affiliation, verdict = %verdict, "Classified affiliation");
                verdict.is_company()
            })
            .count()
    }

    /// `true` if the paper meets the company-affiliation threshold
    pub fn accepts(&self, paper: &PaperRecord) -> bool {
        let company_count = self.company_count(paper);
        let accepted = company_count >= self.min_companies;
        debug!(
            pmid = %paper.pmid,
            company_count,
            min_companies = self.min_companies,
            accepted,
            "Applied company filter"
        );
        accepted
    }

    pub fn filter_papers(&self, papers: impl IntoIterator<Item = PaperRecord>) -> Vec<PaperRecord> {
        papers.into_iter().filter(|p| self.accepts(p)).collect()
    }

    /// Normalize a fetched batch and keep the papers that pass
    pub fn extract_and_filter(&self, batch: &[RawArticle]) -> Vec<PaperRecord> {
        self.filter_papers(batch.iter().map(extract_paper))
    }
}

impl Default for PaperFilter {
    fn default() -> Self {
        Self::new(AffiliationClassifier::default(), 1)
    }
}
