use anyhow::Context as _;
use serde::Deserialize;

/// One tracked document as returned by the Reader list endpoint. Only the
/// fields the readings page needs are kept; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub title: Option<String>,
    pub author: Option<String>,
    pub reading_progress: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub results: Vec<RawItem>,
    #[serde(rename = "nextPageCursor")]
    pub next_page_cursor: Option<String>,
}

impl ListPage {
    /// An absent or empty cursor both mean the listing is exhausted.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Epub,
    Pdf,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Epub => "epub",
            Category::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub token: String,
    pub base_url: String,
    pub limit: u32,
}

impl ReaderConfig {
    /// Fails before any request is attempted when the credential is absent.
    pub fn from_env(base_url: &str, limit: u32) -> anyhow::Result<Self> {
        let token =
            std::env::var("READER_API_TOKEN").map_err(|_| anyhow::anyhow!("READER_API_TOKEN not set"))?;

        Ok(Self {
            token,
            base_url: base_url.trim_end_matches('/').to_owned(),
            limit,
        })
    }
}

pub struct ReaderApi {
    client: reqwest::Client,
    config: ReaderConfig,
}

impl ReaderApi {
    pub fn new(config: ReaderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("build reader http client")?;

        Ok(Self { client, config })
    }

    /// Fetches every page of one category, strictly sequentially.
    pub async fn list_category(&self, category: Category) -> anyhow::Result<Vec<RawItem>> {
        let endpoint = format!("{}/list/", self.config.base_url);
        let limit = self.config.limit.to_string();

        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut params = vec![("category", category.as_str()), ("limit", limit.as_str())];
            if let Some(cursor) = cursor.as_deref() {
                params.push(("pageCursor", cursor));
            }

            let response = self
                .client
                .get(&endpoint)
                .header("Authorization", format!("Token {}", self.config.token))
                .query(&params)
                .send()
                .await
                .with_context(|| format!("GET {endpoint}"))?;

            let status = response.status();
            if !status.is_success() {
                anyhow::bail!(
                    "Error fetching {} books: {}",
                    category.as_str(),
                    status.as_u16()
                );
            }

            let page: ListPage = response
                .json()
                .await
                .with_context(|| format!("parse {} list page", category.as_str()))?;

            tracing::debug!(
                category = category.as_str(),
                results = page.results.len(),
                more = page.continuation().is_some(),
                "fetched list page"
            );

            let next = page.continuation().map(str::to_owned);
            items.extend(page.results);

            match next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(items)
    }
}
