//! Directory-backed document loader

use super::index::{LabelIndex, document_id};
use super::treated_store::TreatedStore;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use triage_application::{DocumentLoader, LoaderError};
use triage_domain::Document;

/// Name of the optional ground-truth index inside the data directory
pub const INDEX_FILE: &str = "index.csv";

/// Loads every `*.txt` file of a directory as a document.
///
/// Documents are handed out in file-name order. Treated documents are kept
/// in a JSON file so later runs skip them.
pub struct FileLoader {
    data_dir: PathBuf,
    index: LabelIndex,
    store: TreatedStore,
    treated: Vec<Document>,
    treated_ids: HashSet<String>,
    pending: VecDeque<String>,
}

impl FileLoader {
    pub fn open(
        data_dir: impl Into<PathBuf>,
        treated_file: impl Into<PathBuf>,
        keep_content: bool,
    ) -> Result<Self, LoaderError> {
        let data_dir = data_dir.into();
        let index = LabelIndex::load(&data_dir.join(INDEX_FILE))?;
        info!(
            "Loaded label index with {} entries from {}",
            index.len(),
            data_dir.display()
        );

        let store = TreatedStore::new(treated_file, keep_content);
        let treated = store.load()?;
        let treated_ids = treated.iter().map(|d| d.id.clone()).collect();

        let mut loader = Self {
            data_dir,
            index,
            store,
            treated,
            treated_ids,
            pending: VecDeque::new(),
        };
        loader.rescan()?;
        Ok(loader)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn treated_file(&self) -> &Path {
        self.store.path()
    }

    /// Rebuild the queue of untreated file names
    fn rescan(&mut self) -> Result<(), LoaderError> {
        let entries = std::fs::read_dir(&self.data_dir).map_err(|source| LoaderError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoaderError::Io {
                path: self.data_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "txt") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && !self.treated_ids.contains(document_id(name))
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        debug!(
            "{} untreated documents in {}",
            names.len(),
            self.data_dir.display()
        );
        self.pending = names.into();
        Ok(())
    }

    fn read_document(&self, filename: &str) -> Result<Document, LoaderError> {
        let path = self.data_dir.join(filename);
        let content = std::fs::read_to_string(&path)
            .map_err(|source| LoaderError::Io { path, source })?;

        let id = document_id(filename);
        let mut doc = Document::new(id)
            .with_content(content)
            .with_meta("filename", filename);
        doc.true_label = self.index.get(id);
        Ok(doc)
    }
}

impl DocumentLoader for FileLoader {
    fn next_document(&mut self) -> Option<Result<Document, LoaderError>> {
        let filename = self.pending.pop_front()?;
        Some(self.read_document(&filename))
    }

    fn mark_as_treated(&mut self, doc: &Document) -> Result<(), LoaderError> {
        if !self.treated_ids.insert(doc.id.clone()) {
            debug!("Document {} already marked as treated", doc.id);
            return Ok(());
        }

        // Content stays in memory for evaluation; the store strips it on save
        let mut record = doc.clone();
        record.treated = true;
        self.treated.push(record);

        self.store.save(&self.treated)?;
        debug!("{} documents marked as treated", self.treated.len());
        Ok(())
    }

    fn treated_documents(&self) -> &[Document] {
        &self.treated
    }

    fn reset(&mut self) -> Result<(), LoaderError> {
        self.store.delete()?;
        self.treated.clear();
        self.treated_ids.clear();
        info!("Cleared treated documents");
        self.rescan()
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.pending.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use triage_domain::Label;

    /// Data directory with three documents and a partial index
    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("b2.txt"), "Second article about markets.").unwrap();
        fs::write(data.join("a1.txt"), "India's economy grows strongly.").unwrap();
        fs::write(data.join("c3.txt"), "Weather report.").unwrap();
        fs::write(data.join("notes.md"), "ignored").unwrap();
        fs::write(
            data.join(INDEX_FILE),
            "filename,label\na1.txt,positive\nb2.txt,\nc3.txt,irrelevant\n",
        )
        .unwrap();
        dir
    }

    fn open(dir: &tempfile::TempDir, keep_content: bool) -> FileLoader {
        FileLoader::open(
            dir.path().join("data"),
            dir.path().join("treated.json"),
            keep_content,
        )
        .unwrap()
    }

    fn classify(mut doc: Document, label: Label) -> Document {
        doc.finish(label);
        doc
    }

    #[test]
    fn test_documents_in_name_order_with_labels() {
        let dir = corpus();
        let mut loader = open(&dir, false);
        assert_eq!(loader.remaining_hint(), Some(3));

        let docs: Vec<Document> = loader
            .load_batch(10)
            .into_iter()
            .map(Result::unwrap)
            .collect();

        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2", "c3"]);
        assert_eq!(docs[0].true_label, Some(Label::Positive));
        assert_eq!(docs[1].true_label, None);
        assert_eq!(docs[2].true_label, Some(Label::Irrelevant));
        assert_eq!(docs[0].meta["filename"], "a1.txt");
        assert_eq!(
            docs[0].content.as_deref(),
            Some("India's economy grows strongly.")
        );
        assert!(loader.next_document().is_none());
    }

    #[test]
    fn test_treated_documents_are_skipped_on_reopen() {
        let dir = corpus();
        {
            let mut loader = open(&dir, false);
            let doc = loader.next_document().unwrap().unwrap();
            loader
                .mark_as_treated(&classify(doc, Label::Positive))
                .unwrap();
        }

        let mut loader = open(&dir, false);
        assert_eq!(loader.treated_documents().len(), 1);
        assert_eq!(loader.treated_documents()[0].id, "a1");
        assert!(loader.treated_documents()[0].content.is_none());
        assert_eq!(loader.remaining_hint(), Some(2));
        assert_eq!(loader.next_document().unwrap().unwrap().id, "b2");
    }

    #[test]
    fn test_mark_as_treated_is_idempotent() {
        let dir = corpus();
        let mut loader = open(&dir, false);
        let doc = classify(loader.next_document().unwrap().unwrap(), Label::Neutral);

        loader.mark_as_treated(&doc).unwrap();
        loader.mark_as_treated(&doc).unwrap();
        assert_eq!(loader.treated_documents().len(), 1);

        let saved: Vec<Document> =
            serde_json::from_str(&fs::read_to_string(loader.treated_file()).unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].predicted_label, Some(Label::Neutral));
    }

    #[test]
    fn test_keep_content_persists_text() {
        let dir = corpus();
        let mut loader = open(&dir, true);
        let doc = classify(loader.next_document().unwrap().unwrap(), Label::Positive);
        loader.mark_as_treated(&doc).unwrap();

        let raw = fs::read_to_string(loader.treated_file()).unwrap();
        assert!(raw.contains("India's economy grows strongly."));
    }

    #[test]
    fn test_treated_documents_keep_content_in_memory() {
        let dir = corpus();
        let mut loader = open(&dir, false);
        let doc = classify(loader.next_document().unwrap().unwrap(), Label::Irrelevant);
        loader.mark_as_treated(&doc).unwrap();

        assert_eq!(
            loader.treated_documents()[0].content.as_deref(),
            Some("India's economy grows strongly.")
        );
        let raw = fs::read_to_string(loader.treated_file()).unwrap();
        assert!(!raw.contains("India's economy"));
    }

    #[test]
    fn test_exported_errors_carry_content() {
        use crate::export::JsonErrorExporter;
        use std::sync::Arc;
        use triage_application::Evaluator;

        let dir = corpus();
        let mut loader = open(&dir, false);
        let doc = classify(loader.next_document().unwrap().unwrap(), Label::Irrelevant);
        loader.mark_as_treated(&doc).unwrap();

        let out = dir.path().join("errors");
        Evaluator::new(loader.treated_documents(), Arc::new(JsonErrorExporter))
            .export_errors_by_model(&out)
            .unwrap();

        let raw = fs::read_to_string(out.join("false_negative.json")).unwrap();
        assert!(raw.contains("\"a1\""));
        assert!(raw.contains("India's economy grows strongly."));
    }

    #[test]
    fn test_reset_starts_over() {
        let dir = corpus();
        let mut loader = open(&dir, false);
        for item in loader.load_batch(2) {
            let doc = classify(item.unwrap(), Label::Negative);
            loader.mark_as_treated(&doc).unwrap();
        }
        assert_eq!(loader.remaining_hint(), Some(1));

        loader.reset().unwrap();
        assert!(loader.treated_documents().is_empty());
        assert!(!loader.treated_file().exists());
        assert_eq!(loader.remaining_hint(), Some(3));
    }

    #[test]
    fn test_corrupt_treated_file_starts_fresh() {
        let dir = corpus();
        fs::write(dir.path().join("treated.json"), "not json at all").unwrap();

        let loader = open(&dir, false);
        assert!(loader.treated_documents().is_empty());
        assert_eq!(loader.remaining_hint(), Some(3));
    }

    #[test]
    fn test_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileLoader::open(dir.path().join("nope"), dir.path().join("t.json"), false);
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }

    #[test]
    fn test_missing_index_means_no_ground_truth() {
        let dir = corpus();
        fs::remove_file(dir.path().join("data").join(INDEX_FILE)).unwrap();

        let mut loader = open(&dir, false);
        let doc = loader.next_document().unwrap().unwrap();
        assert_eq!(doc.true_label, None);
    }
}
