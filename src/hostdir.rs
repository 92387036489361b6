use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The single directory the server may read files from and write files to.
///
/// Every operation resolves only the final segment of the request target
/// against the root, so a target like `/a/b/c.txt` names the file `c.txt`
/// and `../`-style segments can never escape the directory.
#[derive(Debug, Clone)]
pub struct HostDir {
    root: PathBuf,
}

impl HostDir {
    pub fn new(root: PathBuf) -> Self {
        HostDir { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the root currently exists and is a directory. Any probe
    /// failure counts as "does not exist".
    pub fn dir_exists(&self) -> bool {
        self.root.is_dir()
    }

    /// True when the basename of `target` is an entry in the root's
    /// listing. An unreadable or missing root yields false, never an error.
    pub fn exists(&self, target: &str) -> bool {
        let Some(name) = file_name(target) else {
            return false;
        };

        match fs::read_dir(&self.root) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .any(|entry| entry.file_name() == OsStr::new(name)),
            Err(_) => false,
        }
    }

    /// Full contents of the file named by the basename of `target`, as raw
    /// bytes.
    pub fn read(&self, target: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(target)?)
    }

    /// Creates or truncates the file named by the basename of `target` with
    /// `content`. Returns false on any I/O failure.
    pub fn write(&self, target: &str, content: &[u8]) -> bool {
        let path = match self.resolve(target) {
            Ok(path) => path,
            Err(_) => return false,
        };

        match fs::write(&path, content) {
            Ok(()) => true,
            Err(error) => {
                warn!(path = %path.display(), %error, "file write failed");
                false
            }
        }
    }

    /// Resolved on-disk path for a request target. Always `root/<basename>`;
    /// targets whose basename is empty, `.` or `..` do not resolve.
    fn resolve(&self, target: &str) -> io::Result<PathBuf> {
        match file_name(target) {
            Some(name) => Ok(self.root.join(name)),
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("target {target:?} does not name a file"),
            )),
        }
    }
}

/// Final path segment of a request target, if it names a file.
pub fn file_name(target: &str) -> Option<&str> {
    let name = target.rsplit('/').next().unwrap_or(target);
    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}
