use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use chrono::{FixedOffset, Utc};

use crate::classify::classify;
use crate::cli::{SourceKind, SyncArgs};
use crate::mcp::McpConfig;
use crate::reader::{ReaderApi, ReaderConfig};
use crate::render::render_document;
use crate::source::{ApiSource, McpSource, Source};

pub async fn run(args: SyncArgs) -> anyhow::Result<()> {
    let source: Box<dyn Source> = match args.source {
        SourceKind::Api => {
            let config = ReaderConfig::from_env(&args.base_url, args.limit)
                .context("read api configuration")?;
            Box::new(ApiSource::new(ReaderApi::new(config)?))
        }
        SourceKind::Mcp => Box::new(McpSource::new(McpConfig::from_env(args.limit))),
    };

    println!("Fetching books from {}...", source.describe());
    let items = source.list_items().await?;

    if items.is_empty() && source.stop_when_empty() {
        println!("No books found or error occurred");
        return Ok(());
    }

    println!("Found {} books", items.len());

    let shelves = classify(items);
    println!("Currently reading: {}", shelves.currently_reading.len());
    println!("Future reads: {}", shelves.future_reads.len());
    println!("Already read: {}", shelves.already_read.len());

    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).context("build +05:30 offset")?;
    let now = Utc::now().with_timezone(&offset);
    let document = render_document(&shelves, now);

    write_atomically(Path::new(&args.out), &document)
        .with_context(|| format!("write readings page: {}", args.out))?;

    println!("Updated {}", args.out);
    println!("Sync complete!");
    Ok(())
}

/// Writes next to the destination and renames into place, so a failure mid
/// run never leaves a truncated readings page behind.
fn write_atomically(dest: &Path, content: &str) -> anyhow::Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes()).context("write temp file")?;
    tmp.flush().context("flush temp file")?;
    tmp.persist(dest)
        .with_context(|| format!("rename into place: {}", dest.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_existing_content() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let dest = dir.path().join("readings.md");

        std::fs::write(&dest, "old")?;
        write_atomically(&dest, "new contents\n")?;

        assert_eq!(std::fs::read_to_string(&dest)?, "new contents\n");
        Ok(())
    }

    #[test]
    fn atomic_write_creates_missing_file() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let dest = dir.path().join("readings.md");

        write_atomically(&dest, "fresh\n")?;

        assert_eq!(std::fs::read_to_string(&dest)?, "fresh\n");
        Ok(())
    }
}
