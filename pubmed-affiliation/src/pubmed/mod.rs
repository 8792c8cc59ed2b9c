//! PubMed E-utilities access and record handling

pub mod client;
pub mod models;
pub mod parser;
mod responses;

pub use client::PubMedClient;
pub use models::{Author, PaperRecord};
pub use parser::{RawArticle, extract_email, extract_paper, parse_articles_from_xml};
