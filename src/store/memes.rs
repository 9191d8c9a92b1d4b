//! Meme persistence — one directory per author, one file per meme.
//!
//! The directory name is the lower-cased author; the filename is a
//! lower-cased user-chosen stem plus an extension inferred from the source
//! attachment's name. Stems are unique per author, so requesting `a` can
//! never be ambiguous between `a.png` and `a.jpg`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{StoreError, StoreResult};
use super::rotation::{pick_one, RotationState};
use super::ANY_AUTHOR;

/// Stable identifier of a stored meme: the pair that must be unique in the
/// tree. This is what the rotation seen-set keys on, so renaming the storage
/// root does not invalidate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemeId {
    /// Lower-cased author directory name.
    pub author: String,
    /// Full filename including extension.
    pub filename: String,
}

impl fmt::Display for MemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.filename)
    }
}

/// User-supplied authors and filenames each become a single path component
/// under the storage root; a name that could resolve outside its author
/// directory is rejected before any path is built.
fn checked_component(value: &str) -> StoreResult<()> {
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(StoreError::MalformedInput(format!(
            "{value:?} cannot be used as a name"
        )));
    }
    Ok(())
}

/// Handle on the meme directory tree.
#[derive(Debug, Clone)]
pub struct MemeStore {
    root: PathBuf,
}

impl MemeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a stored meme.
    pub fn path_of(&self, id: &MemeId) -> PathBuf {
        self.root.join(&id.author).join(&id.filename)
    }

    /// Every author directory name, sorted. A missing root reads as empty.
    pub fn list_authors(&self) -> StoreResult<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut authors = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                authors.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        authors.sort();
        Ok(authors)
    }

    /// The meme identifiers eligible under the author filter, sorted by
    /// filename.
    ///
    /// [`ANY_AUTHOR`] first picks one author directory uniformly at random
    /// and then lists it; a named author without a directory fails with
    /// [`StoreError::AuthorNotFound`].
    pub fn list_by_author(&self, name: &str) -> StoreResult<Vec<MemeId>> {
        let author = if name == ANY_AUTHOR {
            pick_one(&self.list_authors()?)?.clone()
        } else {
            let author = name.to_lowercase();
            checked_component(&author)?;
            if !self.author_dir(&author).is_dir() {
                return Err(StoreError::AuthorNotFound(author));
            }
            author
        };

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(self.author_dir(&author))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                ids.push(MemeId {
                    author: author.clone(),
                    filename: entry.file_name().to_string_lossy().into_owned(),
                });
            }
        }
        ids.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(ids)
    }

    /// The next unseen meme for `name`, under the rotation guarantee.
    /// Returns the path of the chosen file for the transport layer to send.
    pub fn get_next(
        &self,
        name: &str,
        seen: &mut RotationState<MemeId>,
    ) -> StoreResult<PathBuf> {
        let eligible = self.list_by_author(name)?;
        let chosen = seen.sample(&eligible)?;
        Ok(self.path_of(&chosen))
    }

    /// Resolve one specific meme by exact filename.
    ///
    /// Direct requests only make sense for a named author, so [`ANY_AUTHOR`]
    /// is rejected as malformed.
    pub fn fetch(&self, name: &str, filename: &str) -> StoreResult<PathBuf> {
        if name == ANY_AUTHOR {
            return Err(StoreError::MalformedInput(
                "cannot request a specific meme for a random author".into(),
            ));
        }
        let author = name.to_lowercase();
        checked_component(&author)?;
        checked_component(filename)?;
        let dir = self.author_dir(&author);
        if !dir.is_dir() {
            return Err(StoreError::AuthorNotFound(author));
        }
        let path = dir.join(filename);
        if path.is_file() {
            Ok(path)
        } else {
            Err(StoreError::NotFound)
        }
    }

    /// Sorted filenames of an author's memes.
    pub fn list_names(&self, name: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .list_by_author(name)?
            .into_iter()
            .map(|id| id.filename)
            .collect())
    }

    /// Save attachment bytes as a new meme.
    ///
    /// The author directory is created on demand. The stored filename is the
    /// lower-cased `requested_name` plus the extension of `source_name`; an
    /// existing file with the same stem fails with
    /// [`StoreError::DuplicateName`] regardless of its extension.
    pub fn save(
        &self,
        name: &str,
        bytes: &[u8],
        requested_name: &str,
        source_name: &str,
    ) -> StoreResult<MemeId> {
        let author = name.to_lowercase();
        let stem = requested_name.to_lowercase();
        if author.is_empty() || stem.is_empty() {
            return Err(StoreError::MalformedInput(
                "saving a meme needs both an author and a filename".into(),
            ));
        }
        checked_component(&author)?;
        checked_component(&stem)?;

        let dir = self.author_dir(&author);
        std::fs::create_dir_all(&dir)?;

        if self.find_by_stem(&dir, &stem)?.is_some() {
            return Err(StoreError::DuplicateName(stem));
        }

        let extension = Path::new(source_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let filename = format!("{stem}{extension}");
        std::fs::write(dir.join(&filename), bytes)?;

        info!(author = %author, filename = %filename, "saved meme");
        Ok(MemeId { author, filename })
    }

    /// Delete the meme whose stem equals `filename`. Returns the full
    /// filename that was removed.
    pub fn delete(&self, name: &str, filename: &str) -> StoreResult<String> {
        if name.is_empty() || filename.is_empty() {
            return Err(StoreError::MalformedInput(
                "deleting a meme needs both an author and a filename".into(),
            ));
        }
        let author = name.to_lowercase();
        checked_component(&author)?;
        checked_component(filename)?;
        let dir = self.author_dir(&author);
        if !dir.is_dir() {
            return Err(StoreError::AuthorNotFound(author));
        }

        match self.find_by_stem(&dir, &filename.to_lowercase())? {
            Some(path) => {
                let removed = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                std::fs::remove_file(&path)?;
                info!(author = %author, filename = %removed, "deleted meme");
                Ok(removed)
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn author_dir(&self, author: &str) -> PathBuf {
        self.root.join(author)
    }

    /// First file in `dir` (by sorted filename) whose stem equals `stem`.
    fn find_by_stem(&self, dir: &Path, stem: &str) -> StoreResult<Option<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files.into_iter().find(|path| {
            path.file_stem()
                .map(|s| s.to_string_lossy() == stem)
                .unwrap_or(false)
        }))
    }
}
