use super::QuoteStore;
use crate::error::Result;
use crate::model::SavedQuote;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Saved quotes in a single CSV file.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// A file that is missing or empty still needs its header row.
    fn needs_header(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true)
    }
}

impl QuoteStore for CsvStore {
    fn load(&self) -> Result<Vec<SavedQuote>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<SavedQuote>() {
            records.push(row?);
        }
        Ok(records)
    }

    fn push(&mut self, record: &SavedQuote) -> Result<()> {
        self.ensure_parent()?;
        let write_header = self.needs_header();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuotezError;

    fn store_in(dir: &tempfile::TempDir) -> CsvStore {
        CsvStore::new(dir.path().join("quotes.csv"))
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn first_append_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        assert!(store.append("Test quote", "Test Author").unwrap());

        let content = fs::read_to_string(store.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("quote,author,date_saved"));
        assert!(lines.next().unwrap().starts_with("Test quote,Test Author,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn append_twice_persists_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        assert!(store.append("New quote", "New Author").unwrap());
        assert!(!store.append("New quote", "New Author").unwrap());

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, "New Author");
    }

    #[test]
    fn appends_keep_order_and_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.append("one", "A").unwrap();
        store.append("two", "B").unwrap();

        let records = store.load().unwrap();
        let quotes: Vec<_> = records.iter().map(|r| r.quote.as_str()).collect();
        assert_eq!(quotes, vec!["one", "two"]);

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.matches("quote,author,date_saved").count(), 1);
    }

    #[test]
    fn awkward_text_survives() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let text = "He said, \"Stay hungry.\"\nThen left.";
        store.append(text, "Jobs, Steve").unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quote, text);
        assert_eq!(records[0].author, "Jobs, Steve");
        assert!(!store.append(text, "Jobs, Steve").unwrap());
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        fs::write(
            &path,
            "quote,author,date_saved\nTest quote,Test Author,2024-01-02 03:04:05\n",
        )
        .unwrap();

        let records = CsvStore::new(&path).load().unwrap();
        assert_eq!(
            records,
            vec![SavedQuote {
                quote: "Test quote".into(),
                author: "Test Author".into(),
                date_saved: "2024-01-02 03:04:05".into(),
            }]
        );
    }

    #[test]
    fn empty_file_gets_header_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        fs::write(&path, "").unwrap();

        let mut store = CsvStore::new(&path);
        assert!(store.load().unwrap().is_empty());
        store.append("q", "a").unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(dir.path().join("nested/deeper/quotes.csv"));
        store.append("q", "a").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn malformed_rows_are_persistence_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        fs::write(&path, "quote,author,date_saved\nonly one field\n").unwrap();

        let err = CsvStore::new(&path).load().unwrap_err();
        assert!(matches!(err, QuotezError::Csv(_)));
    }
}
