use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};

use crate::classify::{Entry, Shelves};

/// One markdown table section of the readings page.
struct Table {
    heading: &'static str,
    columns: &'static [&'static str],
    /// Shown as the single row when the table has no data.
    placeholder: &'static str,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn render_into(&self, out: &mut String) {
        let _ = writeln!(out, "## {}\n", self.heading);

        let header = self.columns.join(" | ");
        let _ = writeln!(out, "| {header} |");

        let divider = self
            .columns
            .iter()
            .map(|col| "-".repeat(col.len() + 2))
            .collect::<Vec<_>>()
            .join("|");
        let _ = writeln!(out, "|{divider}|");

        if self.rows.is_empty() {
            let mut row = vec![format!("*{}*", self.placeholder)];
            row.resize(self.columns.len(), String::new());
            let _ = writeln!(out, "{}", render_row(&row));
            return;
        }

        for row in &self.rows {
            let _ = writeln!(out, "{}", render_row(row));
        }
    }
}

/// Empty cells render as `| |` rather than padding to column width; the
/// downstream site generator does not care about alignment.
fn render_row(cells: &[String]) -> String {
    let mut line = String::new();
    for cell in cells {
        line.push_str("| ");
        if !cell.is_empty() {
            line.push_str(cell);
            line.push(' ');
        }
    }
    line.push('|');
    line
}

fn currently_reading_table(entries: &[Entry]) -> Table {
    Table {
        heading: "Currently Reading",
        columns: &["Title", "Author", "Progress", "Notes"],
        placeholder: "No books currently in progress",
        rows: entries
            .iter()
            .map(|e| {
                vec![
                    e.title.clone(),
                    e.author.clone(),
                    format!("{:.1}%", e.progress_percent),
                    String::new(),
                ]
            })
            .collect(),
    }
}

fn future_reads_table(entries: &[Entry]) -> Table {
    Table {
        heading: "Future Reads",
        columns: &["Title", "Author", "Priority", "Notes"],
        placeholder: "No books in queue",
        rows: entries
            .iter()
            .map(|e| vec![e.title.clone(), e.author.clone(), String::new(), String::new()])
            .collect(),
    }
}

fn already_read_table(entries: &[Entry]) -> Table {
    // Year Read / Rating / Notes have no backing field; they stay blank for
    // manual curation downstream.
    Table {
        heading: "Already Read",
        columns: &["Title", "Author", "Year Read", "Rating", "Notes"],
        placeholder: "No completed books yet",
        rows: entries
            .iter()
            .map(|e| {
                vec![
                    e.title.clone(),
                    e.author.clone(),
                    String::new(),
                    String::new(),
                    String::new(),
                ]
            })
            .collect(),
    }
}

/// Renders the full readings page: TOML front matter, then the three tables
/// in fixed order. Deterministic given the shelves and the timestamp.
pub fn render_document(shelves: &Shelves, now: DateTime<FixedOffset>) -> String {
    let mut out = String::new();

    out.push_str("+++\n");
    out.push_str("draft = false\n");
    let _ = writeln!(out, "date = {}", now.format("%Y-%m-%dT%H:%M:%S%:z"));
    out.push_str("title = \"Readings\"\n");
    let _ = writeln!(
        out,
        "description = \"My reading journey - what I am reading, what I want to read, and what I have read (Last synced: {})\"",
        now.format("%Y-%m-%d")
    );
    out.push_str("slug = \"readings\"\n");
    out.push_str("authors = []\n");
    out.push_str("tags = []\n");
    out.push_str("categories = []\n");
    out.push_str("+++\n\n");

    let tables = [
        currently_reading_table(&shelves.currently_reading),
        future_reads_table(&shelves.future_reads),
        already_read_table(&shelves.already_read),
    ];

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push_str("\n---\n\n");
        }
        table.render_into(&mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ist_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-06-01T08:30:00+05:30").unwrap()
    }

    fn entry(title: &str, author: &str, percent: f64) -> Entry {
        Entry {
            title: title.to_owned(),
            author: author.to_owned(),
            progress_percent: percent,
        }
    }

    #[test]
    fn front_matter_carries_date_and_fixed_fields() {
        let doc = render_document(&Shelves::default(), ist_now());

        assert!(doc.starts_with("+++\n"));
        assert!(doc.contains("draft = false"));
        assert!(doc.contains("date = 2025-06-01T08:30:00+05:30"));
        assert!(doc.contains("title = \"Readings\""));
        assert!(doc.contains("(Last synced: 2025-06-01)"));
        assert!(doc.contains("slug = \"readings\""));
        assert!(doc.contains("authors = []"));
        assert!(doc.contains("tags = []"));
        assert!(doc.contains("categories = []"));
    }

    #[test]
    fn empty_shelves_render_one_placeholder_row_each() {
        let doc = render_document(&Shelves::default(), ist_now());

        assert!(doc.contains("| *No books currently in progress* | | | |"));
        assert!(doc.contains("| *No books in queue* | | | |"));
        assert!(doc.contains("| *No completed books yet* | | | | |"));
    }

    #[test]
    fn single_in_progress_book_renders_one_data_row() {
        let shelves = Shelves {
            currently_reading: vec![entry("Dune", "Herbert", 50.0)],
            ..Shelves::default()
        };
        let doc = render_document(&shelves, ist_now());

        assert!(doc.contains("| Dune | Herbert | 50.0% | |"));
        assert!(!doc.contains("*No books currently in progress*"));
        // The other two tables still get placeholders.
        assert!(doc.contains("| *No books in queue* | | | |"));
        assert!(doc.contains("| *No completed books yet* | | | | |"));
    }

    #[test]
    fn tables_appear_in_fixed_order() {
        let doc = render_document(&Shelves::default(), ist_now());

        let currently = doc.find("## Currently Reading").unwrap();
        let future = doc.find("## Future Reads").unwrap();
        let already = doc.find("## Already Read").unwrap();
        assert!(currently < future && future < already);
    }

    #[test]
    fn future_reads_row_leaves_priority_and_notes_blank() {
        let shelves = Shelves {
            future_reads: vec![entry("Solaris", "Lem", 0.0)],
            ..Shelves::default()
        };
        let doc = render_document(&shelves, ist_now());

        assert!(doc.contains("| Solaris | Lem | | |"));
    }
}
