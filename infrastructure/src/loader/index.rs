//! Ground-truth label index (`index.csv`)
//!
//! A header row names the `filename` and `label` columns (any order, extra
//! columns ignored). File names are matched by stem, so `a1.txt` and `a1`
//! are the same document. Empty or unknown labels mean "no ground truth".

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};
use triage_application::LoaderError;
use triage_domain::Label;

/// Document id → ground-truth label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelIndex {
    labels: HashMap<String, Label>,
}

impl LabelIndex {
    /// Read the index at `path`; a missing file is an empty index.
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        if !path.exists() {
            warn!("Label index {} not found; documents have no ground truth", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text).map_err(|message| LoaderError::InvalidData {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse index text. Only a malformed header is an error.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let Some(header) = lines.next() else {
            return Ok(Self::default());
        };
        let columns = split_row(header);
        let position = |name: &str| {
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| format!("missing '{}' column in header", name))
        };
        let filename_col = position("filename")?;
        let label_col = position("label")?;

        let mut labels = HashMap::new();
        for line in lines {
            let fields = split_row(line);
            let Some(filename) = fields.get(filename_col).filter(|f| !f.is_empty()) else {
                continue;
            };
            let raw_label = fields.get(label_col).map(String::as_str).unwrap_or("");
            if raw_label.is_empty() {
                continue;
            }
            match raw_label.parse::<Label>() {
                Ok(label) => {
                    labels.insert(document_id(filename).to_string(), label);
                }
                Err(_) => debug!("Ignoring unknown label '{}' for {}", raw_label, filename),
            }
        }

        Ok(Self { labels })
    }

    pub fn get(&self, id: &str) -> Option<Label> {
        self.labels.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Document id for a file name: the name without its `.txt` extension
pub fn document_id(filename: &str) -> &str {
    filename.strip_suffix(".txt").unwrap_or(filename)
}

/// Split one CSV row, honouring double-quoted fields and `""` escapes
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
