//! CSV and console output for filtered papers
//!
//! - **CSV** - one row per paper, the first five authors flattened into
//!   `AuthorN Name` / `AuthorN Affiliation` columns
//! - **Console** - a human-readable block per paper

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::pubmed::models::PaperRecord;

/// Number of authors flattened into their own CSV columns
pub const MAX_CSV_AUTHORS: usize = 5;

const BASE_COLUMNS: [&str; 6] = [
    "PMID",
    "Title",
    "Publication Date",
    "Corresponding Email",
    "Author Count",
    "Affiliations",
];

/// Errors raised while writing output files
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write papers as CSV to any writer
///
/// Author columns are sized to the paper with the most authors, capped at
/// [`MAX_CSV_AUTHORS`]; papers with fewer authors leave them blank.
pub fn write_csv<W: Write>(papers: &[PaperRecord], writer: W) -> Result<(), ExportError> {
    let author_columns = papers
        .iter()
        .map(|p| p.authors.len())
        .max()
        .unwrap_or(0)
        .min(MAX_CSV_AUTHORS);

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    for i in 1..=author_columns {
        header.push(format!("Author{} Name", i));
        header.push(format!("Author{} Affiliation", i));
    }
    csv_writer.write_record(&header)?;

    for paper in papers {
        let mut row = vec![
            paper.pmid.clone(),
            paper.title.clone(),
            paper.publication_date.clone(),
            paper.corresponding_email.clone().unwrap_or_default(),
            paper.authors.len().to_string(),
            join_affiliations(paper),
        ];

        for i in 0..author_columns {
            match paper.authors.get(i) {
                Some(author) => {
                    row.push(format!("{} {}", author.first_name, author.last_name));
                    row.push(author.affiliation.clone());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }

        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save papers to a CSV file
///
/// Nothing is written when `papers` is empty.
pub fn save_to_csv(papers: &[PaperRecord], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();

    if papers.is_empty() {
        warn!("No papers to save");
        return Ok(());
    }

    let file = File::create(path)?;
    write_csv(papers, file)?;

    info!(
        path = %path.display(),
        papers = papers.len(),
        "Saved {} papers to {}",
        papers.len(),
        path.display()
    );
    Ok(())
}

/// Render one paper for the console
pub fn format_paper_details(paper: &PaperRecord) -> String {
    let mut lines = vec![
        format!("PMID: {}", paper.pmid),
        format!("Title: {}", paper.title),
        format!("Publication Date: {}", paper.publication_date),
    ];

    if let Some(ref email) = paper.corresponding_email {
        lines.push(format!("Corresponding Email: {}", email));
    }

    lines.push("\nAuthors:".to_string());
    for author in &paper.authors {
        lines.push(format!("  - {} {}", author.first_name, author.last_name));
        if !author.affiliation.is_empty() {
            lines.push(format!("    Affiliation: {}", author.affiliation));
        }
    }

    lines.join("\n") + "\n"
}

fn join_affiliations(paper: &PaperRecord) -> String {
    paper
        .affiliations
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ")
}
