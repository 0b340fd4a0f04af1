use std::path::Path;

use bytes::Bytes;

use crate::error::SysResult;
use crate::types::EntryInfo;

/// Filesystem capability consumed by the command handlers.
///
/// All calls are synchronous and blocking; the interpreter executes one
/// command to completion before reading the next line. Paths are always
/// absolute by the time they reach the store - resolution against the
/// session's current directory happens in the shell.
pub trait FileStore {
    /// Metadata for a single path. `NotFound` if it does not exist.
    fn stat(&self, path: &Path) -> SysResult<EntryInfo>;

    /// Children of a directory, in store order (unsorted).
    fn read_dir(&self, path: &Path) -> SysResult<Vec<EntryInfo>>;

    /// Create an empty regular file. `AlreadyExists` if the path is taken.
    fn create_file(&self, path: &Path) -> SysResult<()>;

    /// Create a single directory; the parent must exist.
    fn create_dir(&self, path: &Path) -> SysResult<()>;

    /// Create a directory and any missing ancestors.
    fn create_dir_all(&self, path: &Path) -> SysResult<()>;

    /// Remove a regular file.
    fn remove_file(&self, path: &Path) -> SysResult<()>;

    /// Remove a directory and everything beneath it.
    fn remove_dir_all(&self, path: &Path) -> SysResult<()>;

    /// Copy a regular file. `IsDirectory` if `src` is a directory.
    fn copy_file(&self, src: &Path, dst: &Path) -> SysResult<()>;

    /// Rename or move in one call, best effort atomic.
    fn rename(&self, src: &Path, dst: &Path) -> SysResult<()>;

    /// Whole file as text lines, without terminators.
    fn read_lines(&self, path: &Path) -> SysResult<Vec<String>>;

    /// Whole file as raw bytes.
    fn read_file(&self, path: &Path) -> SysResult<Bytes>;
}

impl<S: FileStore + ?Sized> FileStore for Box<S> {
    fn stat(&self, path: &Path) -> SysResult<EntryInfo> {
        (**self).stat(path)
    }

    fn read_dir(&self, path: &Path) -> SysResult<Vec<EntryInfo>> {
        (**self).read_dir(path)
    }

    fn create_file(&self, path: &Path) -> SysResult<()> {
        (**self).create_file(path)
    }

    fn create_dir(&self, path: &Path) -> SysResult<()> {
        (**self).create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> SysResult<()> {
        (**self).create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> SysResult<()> {
        (**self).remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> SysResult<()> {
        (**self).remove_dir_all(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> SysResult<()> {
        (**self).copy_file(src, dst)
    }

    fn rename(&self, src: &Path, dst: &Path) -> SysResult<()> {
        (**self).rename(src, dst)
    }

    fn read_lines(&self, path: &Path) -> SysResult<Vec<String>> {
        (**self).read_lines(path)
    }

    fn read_file(&self, path: &Path) -> SysResult<Bytes> {
        (**self).read_file(path)
    }
}
