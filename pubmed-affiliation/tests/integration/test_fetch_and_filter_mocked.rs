//! EFetch and the full search → fetch → filter pipeline against a mocked server

mod common;

use pubmed_affiliation::{PaperFilter, PubMedError, RemoteServiceError, is_company_affiliated};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    EFETCH_MIXED_BATCH, EFETCH_SINGLE_COMPANY_PAPER, ESEARCH_EMPTY, ESEARCH_TWO_IDS,
    create_mock_client, mount_efetch, mount_esearch,
};

const ESEARCH_ONE_ID: &str = r#"{"esearchresult": {"count": "1", "idlist": ["12345"]}}"#;

#[tokio::test]
#[traced_test]
async fn test_single_company_paper_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_ONE_ID).await;
    mount_efetch(&mock_server, EFETCH_SINGLE_COMPANY_PAPER).await;

    let client = create_mock_client(&mock_server);
    let papers = client
        .fetch_and_filter_papers("test query", &PaperFilter::default(), 100)
        .await
        .unwrap();

    assert_eq!(papers.len(), 1);
    let paper = &papers[0];
    assert_eq!(paper.pmid, "12345");
    assert_eq!(paper.title, "Test Paper 1");
    assert_eq!(paper.publication_date, "2023");
    assert_eq!(paper.authors.len(), 1);
    assert_eq!(paper.authors[0].full_name(), "John Smith");
    assert_eq!(paper.authors[0].affiliation, "Pfizer Inc.");
    assert!(paper.affiliations.iter().any(|a| a.contains("Pfizer")));
    assert!(paper.affiliations.iter().all(|a| is_company_affiliated(a)));
    assert_eq!(paper.corresponding_email, None);

    assert!(logs_contain("Found 1 papers with company affiliations"));
}

#[tokio::test]
async fn test_threshold_above_company_count_drops_paper() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_ONE_ID).await;
    mount_efetch(&mock_server, EFETCH_SINGLE_COMPANY_PAPER).await;

    let client = create_mock_client(&mock_server);
    let filter = PaperFilter::default().with_min_companies(2);
    let papers = client
        .fetch_and_filter_papers("test query", &filter, 100)
        .await
        .unwrap();

    assert!(papers.is_empty());
}

#[tokio::test]
async fn test_mixed_batch_keeps_only_company_papers() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_TWO_IDS).await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "12345,67890"))
        .and(query_param("retmode", "xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_MIXED_BATCH))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let filter = PaperFilter::default().with_min_companies(2);
    let papers = client
        .fetch_and_filter_papers("mrna delivery", &filter, 100)
        .await
        .unwrap();

    assert_eq!(papers.len(), 1);
    let paper = &papers[0];
    assert_eq!(paper.pmid, "12345");
    assert_eq!(paper.title, "Industry collaboration on in vivo delivery");
    assert_eq!(paper.publication_date, "2024-01-09");
    assert_eq!(paper.affiliations.len(), 3);
    assert_eq!(
        paper.corresponding_email.as_deref(),
        Some("ana.lee@biontech.de")
    );
    // Only the first affiliation per author is kept on the author
    assert_eq!(
        paper.authors[1].affiliation,
        "Harvard University, Boston, MA, USA."
    );
}

#[tokio::test]
#[traced_test]
async fn test_no_search_hits_skips_efetch() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, ESEARCH_EMPTY).await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_SINGLE_COMPANY_PAPER))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let papers = client
        .fetch_and_filter_papers("nothing", &PaperFilter::default(), 100)
        .await
        .unwrap();

    assert!(papers.is_empty());
    assert!(logs_contain("No results found"));
}

#[tokio::test]
async fn test_empty_id_list_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let ids: Vec<String> = Vec::new();
    let batch = client.fetch(&ids).await.unwrap();
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_malformed_xml_is_remote_service_error() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        "<PubmedArticleSet><PubmedArticle><MedlineCitation>",
    )
    .await;

    let client = create_mock_client(&mock_server);
    let err = client.fetch(&["12345"]).await.unwrap_err();

    assert!(err.is_remote_service());
    assert!(matches!(
        err,
        PubMedError::RemoteService(RemoteServiceError::Xml(_))
    ));
}

#[tokio::test]
async fn test_efetch_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.fetch(&["12345"]).await.unwrap_err();

    assert!(matches!(
        err,
        PubMedError::RemoteService(RemoteServiceError::Status { status: 503, .. })
    ));
}

#[tokio::test]
#[traced_test]
async fn test_empty_efetch_body_is_skipped() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, "   \n").await;

    let client = create_mock_client(&mock_server);
    let batch = client.fetch(&["12345"]).await.unwrap();

    assert!(batch.is_empty());
    assert!(logs_contain("EFetch returned an empty body"));
}

#[tokio::test]
async fn test_large_id_list_is_batched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<PubmedArticleSet></PubmedArticleSet>"),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let ids: Vec<String> = (1..=201).map(|i| i.to_string()).collect();
    let batch = client.fetch(&ids).await.unwrap();

    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_book_record_in_batch_does_not_sink_articles() {
    let mock_server = MockServer::start().await;
    mount_esearch(
        &mock_server,
        r#"{"esearchresult": {"count": "3", "idlist": ["12345", "20301295", "67890"]}}"#,
    )
    .await;
    mount_efetch(
        &mock_server,
        r#"<?xml version="1.0" ?>
<PubmedArticleSet>
<PubmedArticle>
    <MedlineCitation>
        <PMID Version="1">12345</PMID>
        <Article>
            <ArticleTitle>Company paper</ArticleTitle>
            <AuthorList>
                <Author>
                    <LastName>Smith</LastName>
                    <ForeName>John</ForeName>
                    <AffiliationInfo><Affiliation>Pfizer Inc.</Affiliation></AffiliationInfo>
                </Author>
            </AuthorList>
        </Article>
    </MedlineCitation>
</PubmedArticle>
<PubmedBookArticle>
    <BookDocument>
        <PMID Version="1">20301295</PMID>
        <Book><BookTitle>GeneReviews</BookTitle></Book>
        <AuthorList>
            <Author><LastName>Adam</LastName><ForeName>Margaret P</ForeName></Author>
        </AuthorList>
    </BookDocument>
</PubmedBookArticle>
<PubmedArticle>
    <MedlineCitation>
        <PMID Version="1">67890</PMID>
        <Article>
            <ArticleTitle>Second company paper</ArticleTitle>
            <AuthorList>
                <Author>
                    <LastName>Doe</LastName>
                    <ForeName>Jane</ForeName>
                    <AffiliationInfo><Affiliation>Genentech Inc</Affiliation></AffiliationInfo>
                </Author>
            </AuthorList>
        </Article>
    </MedlineCitation>
</PubmedArticle>
</PubmedArticleSet>"#,
    )
    .await;

    let client = create_mock_client(&mock_server);
    let papers = client
        .fetch_and_filter_papers("genetics", &PaperFilter::default(), 100)
        .await
        .unwrap();

    let pmids: Vec<&str> = papers.iter().map(|p| p.pmid.as_str()).collect();
    assert_eq!(pmids, vec!["12345", "67890"]);
}

#[tokio::test]
async fn test_fetched_records_normalize_leniently() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        r#"<PubmedArticleSet>
            <PubmedArticle>
                <MedlineCitation>
                    <PMID>555</PMID>
                    <Article>
                        <AuthorList>
                            <Author><CollectiveName>Study Group</CollectiveName></Author>
                        </AuthorList>
                    </Article>
                </MedlineCitation>
            </PubmedArticle>
        </PubmedArticleSet>"#,
    )
    .await;

    let client = create_mock_client(&mock_server);
    let batch = client.fetch(&["555"]).await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].pmid(), Some("555"));

    let papers = PaperFilter::default()
        .with_min_companies(0)
        .extract_and_filter(&batch);
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].title, "");
    assert_eq!(papers[0].publication_date, "");
    assert_eq!(papers[0].authors.len(), 1);
    assert_eq!(papers[0].authors[0].affiliation, "");
    assert!(papers[0].affiliations.is_empty());
}
