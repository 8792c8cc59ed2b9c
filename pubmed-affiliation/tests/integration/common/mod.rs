//! Shared fixtures and mock-server helpers for integration tests

#![allow(dead_code)]

use pubmed_affiliation::{ClientConfig, PubMedClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_EMAIL: &str = "test@example.com";

/// ESearch response listing two PMIDs
pub const ESEARCH_TWO_IDS: &str = r#"{
    "header": {"type": "esearch", "version": "0.3"},
    "esearchresult": {
        "count": "2",
        "retmax": "2",
        "retstart": "0",
        "idlist": ["12345", "67890"],
        "translationset": [],
        "querytranslation": "test[All Fields] AND query[All Fields]"
    }
}"#;

/// ESearch response with no hits
pub const ESEARCH_EMPTY: &str = r#"{
    "header": {"type": "esearch", "version": "0.3"},
    "esearchresult": {
        "count": "0",
        "retmax": "0",
        "retstart": "0",
        "idlist": []
    }
}"#;

/// One record: "Test Paper 1" by John Smith of Pfizer Inc.
pub const EFETCH_SINGLE_COMPANY_PAPER: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2025//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_250101.dtd">
<PubmedArticleSet>
<PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
        <PMID Version="1">12345</PMID>
        <Article PubModel="Print">
            <Journal>
                <JournalIssue CitedMedium="Internet">
                    <PubDate><Year>2023</Year></PubDate>
                </JournalIssue>
                <Title>Test Journal</Title>
            </Journal>
            <ArticleTitle>Test Paper 1</ArticleTitle>
            <AuthorList CompleteYN="Y">
                <Author ValidYN="Y">
                    <LastName>Smith</LastName>
                    <ForeName>John</ForeName>
                    <AffiliationInfo>
                        <Affiliation>Pfizer Inc.</Affiliation>
                    </AffiliationInfo>
                </Author>
            </AuthorList>
        </Article>
    </MedlineCitation>
</PubmedArticle>
</PubmedArticleSet>"#;

/// Two records: one with two company affiliations and an email, one purely academic
pub const EFETCH_MIXED_BATCH: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
<PubmedArticle>
    <MedlineCitation>
        <PMID Version="1">12345</PMID>
        <Article>
            <ArticleTitle>Industry collaboration on <i>in vivo</i> delivery</ArticleTitle>
            <AuthorList>
                <Author>
                    <LastName>Smith</LastName>
                    <ForeName>John</ForeName>
                    <AffiliationInfo>
                        <Affiliation>Moderna Therapeutics, Cambridge, MA, USA.</Affiliation>
                    </AffiliationInfo>
                </Author>
                <Author>
                    <LastName>Lee</LastName>
                    <ForeName>Ana</ForeName>
                    <AffiliationInfo>
                        <Affiliation>Harvard University, Boston, MA, USA.</Affiliation>
                    </AffiliationInfo>
                    <AffiliationInfo>
                        <Affiliation>BioNTech GmbH, Mainz, Germany. Electronic address: ana.lee@biontech.de.</Affiliation>
                    </AffiliationInfo>
                </Author>
            </AuthorList>
            <ArticleDate DateType="Electronic">
                <Year>2024</Year>
                <Month>01</Month>
                <Day>09</Day>
            </ArticleDate>
        </Article>
    </MedlineCitation>
</PubmedArticle>
<PubmedArticle>
    <MedlineCitation>
        <PMID Version="1">67890</PMID>
        <Article>
            <Journal>
                <JournalIssue><PubDate><Year>2022</Year></PubDate></JournalIssue>
            </Journal>
            <ArticleTitle>Purely academic study</ArticleTitle>
            <AuthorList>
                <Author>
                    <LastName>Doe</LastName>
                    <ForeName>Jane</ForeName>
                    <AffiliationInfo>
                        <Affiliation>Stanford Medical School, Stanford, CA, USA.</Affiliation>
                    </AffiliationInfo>
                </Author>
            </AuthorList>
        </Article>
    </MedlineCitation>
</PubmedArticle>
</PubmedArticleSet>"#;

/// Client pointed at a mock server with a high rate limit
pub fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    create_mock_client_with_rate(mock_server, 100.0)
}

pub fn create_mock_client_with_rate(mock_server: &MockServer, rate: f64) -> PubMedClient {
    let config = ClientConfig::new()
        .with_email(TEST_EMAIL)
        .with_base_url(mock_server.uri())
        .with_rate_limit(rate);

    PubMedClient::new(config).expect("mock client config is valid")
}

pub async fn mount_esearch(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/json"),
        )
        .mount(mock_server)
        .await;
}

pub async fn mount_efetch(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/xml"),
        )
        .mount(mock_server)
        .await;
}
