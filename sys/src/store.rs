use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::UNIX_EPOCH;

use bytes::Bytes;
use tsh_sdk::{EntryInfo, FileStore, FileType, SysError, SysResult};

/// `FileStore` backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn map_io(path: &Path, err: &std::io::Error) -> SysError {
    let shown = path.display().to_string();
    match err.kind() {
        ErrorKind::NotFound => SysError::not_found(shown),
        ErrorKind::PermissionDenied => SysError::permission_denied(shown),
        ErrorKind::AlreadyExists => SysError::already_exists(shown),
        _ => SysError::io(format!("{shown}: {err}")),
    }
}

fn entry_from_metadata(path: &Path, meta: &fs::Metadata) -> EntryInfo {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    #[cfg(unix)]
    let executable = {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    };
    #[cfg(not(unix))]
    let executable = meta.is_dir();

    EntryInfo {
        name,
        file_type: if meta.is_dir() {
            FileType::Directory
        } else {
            FileType::Regular
        },
        size: meta.len(),
        modified: meta.modified().unwrap_or(UNIX_EPOCH),
        // A successful stat implies the entry was at least readable to us.
        readable: true,
        writable: !meta.permissions().readonly(),
        executable,
    }
}

impl FileStore for LocalStore {
    fn stat(&self, path: &Path) -> SysResult<EntryInfo> {
        let meta = fs::metadata(path).map_err(|e| map_io(path, &e))?;
        Ok(entry_from_metadata(path, &meta))
    }

    fn read_dir(&self, path: &Path) -> SysResult<Vec<EntryInfo>> {
        let meta = fs::metadata(path).map_err(|e| map_io(path, &e))?;
        if !meta.is_dir() {
            return Err(SysError::not_directory(path.display().to_string()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| map_io(path, &e))? {
            let entry = entry.map_err(|e| map_io(path, &e))?;
            match entry.metadata() {
                Ok(meta) => entries.push(entry_from_metadata(&entry.path(), &meta)),
                // Entry vanished between readdir and stat; skip it.
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(map_io(&entry.path(), &e)),
            }
        }
        Ok(entries)
    }

    fn create_file(&self, path: &Path) -> SysResult<()> {
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| map_io(path, &e))
    }

    fn create_dir(&self, path: &Path) -> SysResult<()> {
        fs::create_dir(path).map_err(|e| map_io(path, &e))
    }

    fn create_dir_all(&self, path: &Path) -> SysResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io(path, &e))
    }

    fn remove_file(&self, path: &Path) -> SysResult<()> {
        fs::remove_file(path).map_err(|e| map_io(path, &e))
    }

    fn remove_dir_all(&self, path: &Path) -> SysResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io(path, &e))
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> SysResult<()> {
        let meta = fs::metadata(src).map_err(|e| map_io(src, &e))?;
        if meta.is_dir() {
            return Err(SysError::is_directory(src.display().to_string()));
        }
        fs::copy(src, dst).map(|_| ()).map_err(|e| map_io(dst, &e))
    }

    fn rename(&self, src: &Path, dst: &Path) -> SysResult<()> {
        fs::rename(src, dst).map_err(|e| map_io(src, &e))
    }

    fn read_lines(&self, path: &Path) -> SysResult<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|e| map_io(path, &e))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn read_file(&self, path: &Path) -> SysResult<Bytes> {
        fs::read(path).map(Bytes::from).map_err(|e| map_io(path, &e))
    }
}
