use super::{DocumentMeta, DocumentStore, RefreshReport};
use crate::codec;
use crate::error::{PuzzleError, Result};
use crate::model::Puzzle;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_FILENAME: &str = "data.json";
const DOCUMENT_PREFIX: &str = "puzzle-";
const DEFAULT_FILE_EXT: &str = ".json";

/// File-based document store: an index file plus one document file per
/// puzzle, all in a single directory.
pub struct FileStore {
    root: PathBuf,
    file_ext: String,
    dirty: HashSet<String>,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: DEFAULT_FILE_EXT.to_string(),
            dirty: HashSet::new(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_filename(&self, id: &str) -> String {
        format!("{}{}{}", DOCUMENT_PREFIX, id, self.file_ext)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load_index(&self) -> Result<HashMap<String, DocumentMeta>> {
        let index_file = self.root.join(INDEX_FILENAME);
        if !index_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(index_file)?;
        let index: HashMap<String, DocumentMeta> = serde_json::from_str(&content)?;
        Ok(index)
    }

    fn save_index(&self, index: &HashMap<String, DocumentMeta>) -> Result<()> {
        let index_file = self.root.join(INDEX_FILENAME);
        let content = serde_json::to_string_pretty(index)?;
        fs::write(index_file, content)?;
        Ok(())
    }

    fn write_document(&self, puzzle: &Puzzle) -> Result<()> {
        let path = self.root.join(self.document_filename(&puzzle.id));
        fs::write(path, codec::encode(puzzle)?)?;
        Ok(())
    }

    /// Document id encoded in a directory entry name, if it is one of ours.
    fn id_from_filename(&self, name: &str) -> Option<String> {
        let stem = name
            .strip_prefix(DOCUMENT_PREFIX)?
            .strip_suffix(self.file_ext.as_str())?;
        if stem.is_empty() {
            None
        } else {
            Some(stem.to_string())
        }
    }
}

impl DocumentStore for FileStore {
    fn create(&mut self, puzzle: &Puzzle) -> Result<()> {
        if puzzle.id.is_empty() {
            return Err(PuzzleError::InvalidArgument(
                "Cannot store a puzzle with an empty id.".to_string(),
            ));
        }
        self.ensure_dir()?;

        let mut index = self.load_index()?;
        if index.contains_key(&puzzle.id) {
            return Err(PuzzleError::Store(format!(
                "Puzzle already stored: {}",
                puzzle.id
            )));
        }
        index.insert(puzzle.id.clone(), DocumentMeta::new(puzzle));

        self.write_document(puzzle)?;
        self.save_index(&index)?;
        tracing::debug!("Created puzzle document: {}", puzzle.id);
        Ok(())
    }

    fn open(&self, id: &str) -> Result<Puzzle> {
        let index = self.load_index()?;
        if !index.contains_key(id) {
            return Err(PuzzleError::PuzzleNotFound(id.to_string()));
        }

        let path = self.root.join(self.document_filename(id));
        let content = fs::read_to_string(path)?;
        codec::decode(&content)
    }

    fn save(&mut self, puzzle: &Puzzle) -> Result<()> {
        self.ensure_dir()?;

        let mut index = self.load_index()?;
        match index.get_mut(&puzzle.id) {
            Some(meta) => {
                meta.name = puzzle.name.clone();
                meta.updated_at = Utc::now();
            }
            None => {
                index.insert(puzzle.id.clone(), DocumentMeta::new(puzzle));
            }
        }

        self.write_document(puzzle)?;
        self.save_index(&index)?;
        self.dirty.remove(&puzzle.id);
        tracing::debug!("Saved puzzle document: {}", puzzle.id);
        Ok(())
    }

    fn mark_dirty(&mut self, id: &str) -> Result<()> {
        self.dirty.insert(id.to_string());
        Ok(())
    }

    fn is_dirty(&self, id: &str) -> bool {
        self.dirty.contains(id)
    }

    fn refresh(&mut self) -> Result<RefreshReport> {
        self.ensure_dir()?;
        let mut index = self.load_index()?;
        let mut report = RefreshReport::default();

        index.retain(|id, _| {
            let exists = self.root.join(self.document_filename(id)).exists();
            if !exists {
                tracing::warn!("Dropping index entry without a document file: {}", id);
                report.pruned += 1;
            }
            exists
        });

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(id) = self.id_from_filename(&name) else {
                continue;
            };
            if index.contains_key(&id) {
                continue;
            }

            let decoded = fs::read_to_string(entry.path())
                .map_err(PuzzleError::Io)
                .and_then(|content| codec::decode(&content));
            match decoded {
                Ok(puzzle) if puzzle.id == id => {
                    tracing::debug!("Adopted stray puzzle document: {}", id);
                    index.insert(id, DocumentMeta::new(&puzzle));
                    report.adopted += 1;
                }
                Ok(puzzle) => {
                    // Filename and embedded id disagree; don't guess
                    tracing::warn!(
                        "Skipping document {} whose embedded id is {}",
                        name,
                        puzzle.id
                    );
                }
                Err(err) => {
                    tracing::warn!("Skipping unreadable puzzle document {}: {}", name, err);
                }
            }
        }

        self.save_index(&index)?;
        Ok(report)
    }

    fn list(&self) -> Result<Vec<DocumentMeta>> {
        let mut metas: Vec<DocumentMeta> = self.load_index()?.into_values().collect();
        metas.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(metas)
    }

    fn document_path(&self, id: &str) -> Result<PathBuf> {
        let path = self.root.join(self.document_filename(id));
        if path.exists() {
            Ok(path)
        } else {
            Err(PuzzleError::PuzzleNotFound(id.to_string()))
        }
    }
}
