use async_trait::async_trait;

use crate::mcp::McpConfig;
use crate::reader::{Category, RawItem, ReaderApi};

/// A sourcing strategy for the reading list. The two implementations
/// deliberately disagree on failure severity: the HTTP path treats any
/// upstream error as fatal, while the subprocess path degrades to an empty
/// list and asks the orchestrator to stop quietly.
#[async_trait]
pub trait Source {
    async fn list_items(&self) -> anyhow::Result<Vec<RawItem>>;

    /// Whether an empty result should end the run without writing anything.
    fn stop_when_empty(&self) -> bool;

    fn describe(&self) -> &'static str;
}

pub struct ApiSource {
    api: ReaderApi,
}

impl ApiSource {
    pub fn new(api: ReaderApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Source for ApiSource {
    async fn list_items(&self) -> anyhow::Result<Vec<RawItem>> {
        let mut items = self.api.list_category(Category::Epub).await?;
        items.extend(self.api.list_category(Category::Pdf).await?);
        Ok(items)
    }

    fn stop_when_empty(&self) -> bool {
        false
    }

    fn describe(&self) -> &'static str {
        "Reader API"
    }
}

pub struct McpSource {
    config: McpConfig,
}

impl McpSource {
    pub fn new(config: McpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Source for McpSource {
    async fn list_items(&self) -> anyhow::Result<Vec<RawItem>> {
        Ok(crate::mcp::list_documents(&self.config).await)
    }

    fn stop_when_empty(&self) -> bool {
        true
    }

    fn describe(&self) -> &'static str {
        "Reader"
    }
}
