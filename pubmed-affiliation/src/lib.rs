//! # PubMed Affiliation Filter
//!
//! Finds PubMed papers written with pharmaceutical or biotech companies.
//!
//! The crate searches PubMed through the NCBI E-utilities, fetches article
//! metadata, and classifies every author affiliation as company or
//! non-company with a keyword heuristic. Papers with fewer company
//! affiliations than a threshold are dropped.
//!
//! ## Features
//!
//! - **Rate-limited client**: every request waits for NCBI's minimum spacing
//! - **Lexical classifier**: academic keywords take precedence over corporate ones
//! - **Lenient extraction**: missing authors, dates or affiliations never fail a record
//! - **Export**: CSV files and console summaries
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_affiliation::{ClientConfig, PaperFilter, PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env().with_email_fallback(Some("me@example.org".into()));
//!     let client = PubMedClient::new(config)?;
//!
//!     let papers = client
//!         .fetch_and_filter_papers("cancer immunotherapy", &PaperFilter::default(), 100)
//!         .await?;
//!
//!     for paper in &papers {
//!         print!("{}", pubmed_affiliation::export::format_paper_details(paper));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod affiliation;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod pubmed;
pub mod rate_limit;

// Re-export main types for convenience
pub use affiliation::{AffiliationClassifier, Classification, KeywordLists, is_company_affiliated};
pub use config::ClientConfig;
pub use error::{PubMedError, RemoteServiceError, Result};
pub use filter::PaperFilter;
pub use pubmed::{Author, PaperRecord, PubMedClient, RawArticle};
pub use rate_limit::RateLimiter;
