use crate::reader::RawItem;

/// One row of the rendered readings page.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub author: String,
    /// `reading_progress * 100`, rounded to one decimal place.
    pub progress_percent: f64,
}

/// The three mutually exclusive progress buckets. Order within each shelf is
/// the order items arrived from the source; nothing is re-sorted.
#[derive(Debug, Clone, Default)]
pub struct Shelves {
    pub currently_reading: Vec<Entry>,
    pub future_reads: Vec<Entry>,
    pub already_read: Vec<Entry>,
}

impl Shelves {
    pub fn total(&self) -> usize {
        self.currently_reading.len() + self.future_reads.len() + self.already_read.len()
    }
}

/// Buckets every item by reading progress. Missing fields fall back to
/// `"Unknown"` / zero progress; no item is ever dropped.
pub fn classify(items: Vec<RawItem>) -> Shelves {
    let mut shelves = Shelves::default();

    for item in items {
        let progress = item.reading_progress.unwrap_or(0.0);
        let entry = Entry {
            title: item.title.unwrap_or_else(|| "Unknown".to_owned()),
            author: item.author.unwrap_or_else(|| "Unknown".to_owned()),
            progress_percent: round1(progress * 100.0),
        };

        if progress == 0.0 {
            shelves.future_reads.push(entry);
        } else if progress >= 0.99 {
            shelves.already_read.push(entry);
        } else {
            shelves.currently_reading.push(entry);
        }
    }

    shelves
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
