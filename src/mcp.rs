use std::process::Stdio;
use std::time::Duration;

use anyhow::Context as _;
use tokio::process::Command;

use crate::reader::{ListPage, RawItem};

const MCP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct McpConfig {
    pub bin: String,
    pub limit: u32,
}

impl McpConfig {
    pub fn from_env(limit: u32) -> Self {
        let bin = std::env::var("READSYNC_MCP_BIN").unwrap_or_else(|_| "opencode".to_owned());
        Self { bin, limit }
    }
}

/// Asks the MCP CLI for one page of epub documents. Unlike the HTTP path,
/// every failure mode here (spawn error, timeout, missing or unparseable
/// JSON) degrades to an empty list; the caller decides what that means.
pub async fn list_documents(config: &McpConfig) -> Vec<RawItem> {
    match try_list_documents(config).await {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!("Error fetching books: {err:#}");
            Vec::new()
        }
    }
}

async fn try_list_documents(config: &McpConfig) -> anyhow::Result<Vec<RawItem>> {
    let limit = config.limit.to_string();

    let child = Command::new(&config.bin)
        .args([
            "--mcp-call",
            "Reader",
            "reader_list_documents",
            "--category",
            "epub",
            "--limit",
            &limit,
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawn mcp cli: {}", config.bin))?;

    // A non-zero exit alone is not an error as long as stdout carries JSON.
    let output = tokio::time::timeout(MCP_TIMEOUT, child.wait_with_output())
        .await
        .map_err(|_| anyhow::anyhow!("mcp cli timed out after {}s", MCP_TIMEOUT.as_secs()))?
        .context("wait mcp cli")?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json = extract_json_object(&stdout)
        .ok_or_else(|| anyhow::anyhow!("no JSON object in mcp cli output"))?;
    let page: ListPage = serde_json::from_str(json).context("parse mcp cli response")?;

    Ok(page.results)
}

/// Greedy brace match: the CLI wraps its JSON response in free-form text, so
/// take everything from the first `{` through the last `}`.
fn extract_json_object(output: &str) -> Option<&str> {
    let start = output.find('{')?;
    let end = output.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&output[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_surrounded_by_noise() {
        let output = "Calling tool...\n{\"results\": []}\nDone.";
        assert_eq!(extract_json_object(output), Some("{\"results\": []}"));
    }

    #[test]
    fn takes_first_open_to_last_close() {
        let output = "x {\"a\": {\"b\": 1}} y";
        assert_eq!(extract_json_object(output), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn no_object_yields_none() {
        assert_eq!(extract_json_object("nothing here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }
}
