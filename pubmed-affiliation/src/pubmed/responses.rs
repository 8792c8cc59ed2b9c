use serde::Deserialize;

/// ESearch JSON envelope (`retmode=json`)
#[derive(Debug, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchData {
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub idlist: Vec<String>,
    /// How PubMed interpreted and translated the search query
    #[serde(default)]
    pub querytranslation: Option<String>,
}
