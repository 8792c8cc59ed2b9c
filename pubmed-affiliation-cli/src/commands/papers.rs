use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use pubmed_affiliation::export::{format_paper_details, save_to_csv};
use pubmed_affiliation::{AffiliationClassifier, PaperFilter, PaperRecord, PubMedClient};
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct Papers {
    /// PubMed search query (supports full PubMed query syntax)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Filename to save results as CSV (prints to console if not specified)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Minimum number of company affiliations required
    #[arg(long, default_value = "1")]
    pub min_companies: usize,

    /// Maximum number of results to retrieve
    #[arg(long, default_value = "100")]
    pub max_results: usize,

    /// YAML file with `company` / `non_company` keyword lists
    #[arg(long, value_name = "YAML")]
    pub keywords: Option<PathBuf>,
}

impl Papers {
    pub async fn execute(&self, client: &PubMedClient) -> Result<()> {
        let classifier = load_classifier(self.keywords.as_deref())?;
        let filter = PaperFilter::new(classifier, self.min_companies);

        debug!(
            query = %self.query,
            min_companies = self.min_companies,
            max_results = self.max_results,
            "Running paper search"
        );

        println!("Query: {}", self.query);
        println!("Searching PubMed...");

        let papers = client
            .fetch_and_filter_papers(&self.query, &filter, self.max_results)
            .await?;

        if papers.is_empty() {
            println!("No papers found matching the criteria.");
            return Ok(());
        }

        println!("Found {} papers with company affiliations.", papers.len());

        self.write_results(&papers, &mut io::stdout().lock())
    }

    /// Save to the CSV file if one was given, otherwise print every paper
    fn write_results<W: Write>(&self, papers: &[PaperRecord], out: &mut W) -> Result<()> {
        match &self.file {
            Some(path) => {
                save_to_csv(papers, path)?;
                writeln!(out, "Results saved to {}", path.display())?;
            }
            None => {
                for paper in papers {
                    writeln!(out, "\n{}", format_paper_details(paper))?;
                }
            }
        }

        Ok(())
    }
}

fn load_classifier(path: Option<&Path>) -> pubmed_affiliation::Result<AffiliationClassifier> {
    match path {
        Some(path) => {
            let classifier = AffiliationClassifier::from_yaml_file(path)?;
            info!(
                path = %path.display(),
                company = classifier.company_keywords().len(),
                non_company = classifier.non_company_keywords().len(),
                "Loaded keyword lists"
            );
            Ok(classifier)
        }
        None => Ok(AffiliationClassifier::default()),
    }
}
