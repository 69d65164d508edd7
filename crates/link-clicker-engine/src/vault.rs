use relative_path::{Component, RelativePath, RelativePathBuf};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::LinkResolver;
use crate::file::{FileHandle, MARKDOWN_EXTENSION};
use crate::host::{HostError, LinkIndex};
use crate::links::{DocumentLinks, scan_links};

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault directory: {0}")]
    InvalidVaultDir(String),
}

/// A folder of notes on disk.
///
/// Files are tracked by vault-relative path. Hidden entries (names starting
/// with `.`) are skipped.
#[derive(Debug, Clone)]
pub struct NoteVault {
    root: PathBuf,
    files: BTreeSet<FileHandle>,
}

impl NoteVault {
    /// Opens the vault at `root` and scans it.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let root = root.into();
        validate_vault_dir(&root)?;
        let mut vault = Self {
            root,
            files: BTreeSet::new(),
        };
        vault.rescan()?;
        Ok(vault)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-reads the folder structure from disk.
    pub fn rescan(&mut self) -> Result<(), VaultError> {
        let mut found = Vec::new();
        scan_directory_recursive(&self.root, &mut found)?;
        self.files = found
            .iter()
            .filter_map(|path| path.strip_prefix(&self.root).ok())
            .filter_map(|relative| RelativePathBuf::from_path(relative).ok())
            .map(FileHandle::new)
            .collect();
        log::debug!("scanned {} files in {}", self.files.len(), self.root.display());
        Ok(())
    }

    /// All files, sorted by path.
    pub fn files(&self) -> impl Iterator<Item = &FileHandle> {
        self.files.iter()
    }

    /// Markdown notes only, sorted by path.
    pub fn notes(&self) -> impl Iterator<Item = &FileHandle> {
        self.files
            .iter()
            .filter(|file| file.path().extension() == Some(MARKDOWN_EXTENSION))
    }

    pub fn get(&self, path: &RelativePath) -> Option<&FileHandle> {
        self.files.get(&FileHandle::new(path.normalize()))
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.get(path).is_some()
    }

    /// Reads a file's content.
    pub fn read(&self, path: &RelativePath) -> Result<String, VaultError> {
        let absolute_path = path.to_path(&self.root);
        if !absolute_path.exists() {
            return Err(VaultError::NotFound(absolute_path));
        }
        fs::read_to_string(&absolute_path).map_err(VaultError::Io)
    }

    /// Link and embed spans of the note at `path`, computed from its current content.
    pub fn document_links(&self, path: &RelativePath) -> Option<DocumentLinks> {
        match self.read(path) {
            Ok(content) => Some(scan_links(&content)),
            Err(err) => {
                log::warn!("no links for {path}: {err}");
                None
            }
        }
    }

    /// Finds the file a link target points at when written in `from`.
    ///
    /// An empty target is the linking document itself. Otherwise the target
    /// is tried as written and with `.md` appended: first as a vault path,
    /// then relative to the folder of `from`, then as a case-insensitive path
    /// suffix anywhere in the vault, preferring the folder of `from` and then
    /// the shortest path.
    pub fn resolve(&self, target: &str, from: &RelativePath) -> Option<FileHandle> {
        if target.is_empty() {
            return self.get(from).cloned();
        }

        let target = target.trim_start_matches('/');
        let candidates = link_candidates(target);
        let folder = from.parent().unwrap_or(RelativePath::new(""));

        for candidate in &candidates {
            if let Some(file) = self.get(RelativePath::new(candidate)) {
                return Some(file.clone());
            }
        }
        for candidate in &candidates {
            if let Some(file) = self.get(&folder.join_normalized(candidate)) {
                return Some(file.clone());
            }
        }

        candidates.iter().find_map(|candidate| {
            let wanted = candidate.to_lowercase();
            let suffix = format!("/{wanted}");
            self.files
                .iter()
                .filter(|file| {
                    let path = file.path().as_str().to_lowercase();
                    path == wanted || path.ends_with(&suffix)
                })
                .min_by_key(|file| (file.folder() != folder, file.path().as_str().len()))
                .cloned()
        })
    }

    /// Creates a new file and registers it in the vault.
    ///
    /// Fails when the path is empty, escapes the vault, or already exists.
    /// Missing parent folders are created.
    pub fn create(&mut self, path: &RelativePath, contents: &str) -> Result<FileHandle, HostError> {
        let path = path.normalize();
        if path.as_str().is_empty() || path.components().next() == Some(Component::ParentDir) {
            return Err(HostError::InvalidPath(path.to_string()));
        }

        let absolute_path = path.to_path(&self.root);
        if self.contains(&path) || absolute_path.exists() {
            return Err(HostError::AlreadyExists(path));
        }

        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&absolute_path, contents)?;

        let file = FileHandle::new(path);
        self.files.insert(file.clone());
        log::info!("created {file} in {}", self.root.display());
        Ok(file)
    }
}

impl LinkResolver for NoteVault {
    fn resolve_link_path(&self, target: &str, from: &RelativePath) -> Option<FileHandle> {
        self.resolve(target, from)
    }
}

impl LinkIndex for NoteVault {
    fn document_links(&self, path: &RelativePath) -> Option<DocumentLinks> {
        NoteVault::document_links(self, path)
    }
}

/// `target` as written, and with `.md` appended unless already present.
fn link_candidates(target: &str) -> Vec<String> {
    let markdown_suffix = format!(".{MARKDOWN_EXTENSION}");
    if target.to_lowercase().ends_with(&markdown_suffix) {
        vec![target.to_string()]
    } else {
        vec![format!("{target}{markdown_suffix}"), target.to_string()]
    }
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), VaultError> {
    let entries = fs::read_dir(dir).map_err(VaultError::Io)?;

    for entry in entries {
        let entry = entry.map_err(VaultError::Io)?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_vault_dir(path: &Path) -> Result<(), VaultError> {
    if !path.exists() || !path.is_dir() {
        return Err(VaultError::InvalidVaultDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
