use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, RemoteServiceError, Result};
use crate::filter::PaperFilter;
use crate::pubmed::models::PaperRecord;
use crate::pubmed::parser::{RawArticle, parse_articles_from_xml};
use crate::pubmed::responses::ESearchResult;
use crate::rate_limit::RateLimiter;

/// PubMed limits: retstart cannot exceed 9998 and retmax is capped at 9999
const MAX_RETRIEVABLE: usize = 9999;

/// NCBI recommends batches of up to 200 IDs per EFetch request
const FETCH_BATCH_SIZE: usize = 200;

/// Rate-limited client for the PubMed ESearch and EFetch endpoints
///
/// Clones share the HTTP connection pool and the rate limiter, so spacing
/// holds across every clone.
#[derive(Clone, Debug)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no contact email is configured or the
    /// rate limit is not a positive number.
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_affiliation::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@university.edu")
    ///     .with_rate_limit(3.0);
    /// let client = PubMedClient::new(config)?;
    ///
    /// let missing = PubMedClient::new(ClientConfig::new());
    /// assert!(missing.unwrap_err().is_configuration());
    /// # Ok::<(), pubmed_affiliation::PubMedError>(())
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .map_err(|e| {
                PubMedError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Self::with_client(client, config)
    }

    /// Create a client from `NCBI_EMAIL` / `NCBI_API_KEY`
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client around a preconfigured reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        debug!(
            base_url = %base_url,
            min_interval_ms = rate_limiter.min_interval().as_millis() as u64,
            "Created PubMed client"
        );

        Ok(Self {
            client,
            base_url,
            rate_limiter,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Search PubMed and return matching PMIDs in the order the service ranks them
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text query, passed through in PubMed query syntax
    /// * `max_results` - Upper bound on the number of PMIDs returned
    ///
    /// # Errors
    ///
    /// Returns a remote service error on transport failure, non-success
    /// status, an undecodable body, or an `ERROR` field in the response.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_affiliation::{ClientConfig, PubMedClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new(ClientConfig::new().with_email("me@example.org"))?;
    ///     let pmids = client.search("cancer immunotherapy", 10).await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        let retmax = if max_results > MAX_RETRIEVABLE {
            warn!(
                requested = max_results,
                maximum = MAX_RETRIEVABLE,
                "Requested more results than PubMed can return, clamping"
            );
            MAX_RETRIEVABLE
        } else {
            max_results
        };

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(query),
            retmax
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let body = response.text().await?;
        let search_result: ESearchResult = serde_json::from_str(&body)?;

        // NCBI sometimes returns 200 OK with an ERROR field
        if let Some(error_msg) = search_result.esearchresult.error {
            return Err(RemoteServiceError::Api(format!("ESearch: {}", error_msg)).into());
        }

        info!(
            total = search_result.esearchresult.count.as_deref().unwrap_or("0"),
            returned = search_result.esearchresult.idlist.len(),
            query_translation = ?search_result.esearchresult.querytranslation,
            "Search completed"
        );

        Ok(search_result.esearchresult.idlist)
    }

    /// Fetch full records for a set of PMIDs
    ///
    /// IDs are sent in batches of up to 200 per request and every batch waits
    /// on the rate limiter. An empty slice issues no request.
    ///
    /// # Errors
    ///
    /// Returns a remote service error on transport failure, non-success
    /// status, or a body that is not PubMed article XML.
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch<S: AsRef<str>>(&self, pmids: &[S]) -> Result<Vec<RawArticle>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = Vec::with_capacity(pmids.len());

        for chunk in pmids.chunks(FETCH_BATCH_SIZE) {
            let id_list = chunk
                .iter()
                .map(|id| urlencoding::encode(id.as_ref().trim()).into_owned())
                .collect::<Vec<_>>()
                .join(",");

            let url = format!(
                "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
                self.base_url, id_list
            );

            debug!(batch_size = chunk.len(), "Making EFetch API request");
            let response = self.make_request(&url).await?;
            let xml_text = response.text().await?;

            if xml_text.trim().is_empty() {
                warn!(batch_size = chunk.len(), "EFetch returned an empty body");
                continue;
            }

            let batch = parse_articles_from_xml(&xml_text)?;
            info!(
                requested = chunk.len(),
                parsed = batch.len(),
                "Batch fetch completed"
            );
            records.extend(batch);
        }

        Ok(records)
    }

    /// Search, fetch, normalize and keep papers with enough company affiliations
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_affiliation::{ClientConfig, PaperFilter, PubMedClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new(ClientConfig::new().with_email("me@example.org"))?;
    ///     let filter = PaperFilter::default().with_min_companies(2);
    ///     let papers = client.fetch_and_filter_papers("mRNA vaccine", &filter, 50).await?;
    ///     for paper in papers {
    ///         println!("{}: {}", paper.pmid, paper.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, filter), fields(query = %query, min_companies = filter.min_companies()))]
    pub async fn fetch_and_filter_papers(
        &self,
        query: &str,
        filter: &PaperFilter,
        max_results: usize,
    ) -> Result<Vec<PaperRecord>> {
        info!("Searching PubMed for: {}", query);

        let pmids = self.search(query, max_results).await?;
        if pmids.is_empty() {
            warn!("No results found");
            return Ok(Vec::new());
        }

        let batch = self.fetch(&pmids).await?;
        let papers = filter.extract_and_filter(&batch);

        info!(
            fetched = batch.len(),
            retained = papers.len(),
            "Found {} papers with company affiliations",
            papers.len()
        );

        Ok(papers)
    }

    /// Internal helper method for making HTTP requests with NCBI API parameters
    ///
    /// Waits on the rate limiter, then issues a single GET. No retries.
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        self.rate_limiter.acquire().await;
        debug!("Making API request to: {}", final_url);

        let response = self.client.get(&final_url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(RemoteServiceError::Status {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            }
            .into());
        }

        Ok(response)
    }
}
