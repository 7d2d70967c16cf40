//! Paths checked against the file system.

use std::fs;
use std::path::Path;

use optgraph_parser::{ValidationError, Validator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    File,
    Directory,
}

/// Accept paths satisfying every enabled file system check.
///
/// Checks run when the value is consumed, against the file system at that time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileValidator {
    exists: Option<bool>,
    kind: Option<Kind>,
    readable: bool,
    writable: bool,
}

impl FileValidator {
    /// A validator accepting any path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The path must exist. Replaces [`FileValidator::not_exists`].
    pub fn exists(mut self) -> Self {
        self.exists = Some(true);
        self
    }

    /// The path must not exist. Replaces [`FileValidator::exists`].
    pub fn not_exists(mut self) -> Self {
        self.exists = Some(false);
        self
    }

    /// The path must be a regular file. Replaces [`FileValidator::is_directory`].
    pub fn is_file(mut self) -> Self {
        self.kind = Some(Kind::File);
        self
    }

    /// The path must be a directory. Replaces [`FileValidator::is_file`].
    pub fn is_directory(mut self) -> Self {
        self.kind = Some(Kind::Directory);
        self
    }

    /// The path must be readable by the current process.
    pub fn readable(mut self) -> Self {
        self.readable = true;
        self
    }

    /// The path must be writable by the current process.
    ///
    /// A file is opened for writing, without truncating it. A directory only has its read-only
    /// attribute checked.
    pub fn writable(mut self) -> Self {
        self.writable = true;
        self
    }
}

impl Validator for FileValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let path = Path::new(value);
        let fail = |reason: &str| Err(ValidationError::new(format!("path <{value}> {reason}")));

        match self.exists {
            Some(true) if !path.exists() => return fail("does not exist"),
            Some(false) if path.exists() => return fail("exists"),
            _ => {}
        }

        match self.kind {
            Some(Kind::File) if !path.is_file() => return fail("is not a file"),
            Some(Kind::Directory) if !path.is_dir() => return fail("is not a directory"),
            _ => {}
        }

        if self.readable && !is_readable(path) {
            return fail("can't be read");
        }

        if self.writable && !is_writable(path) {
            return fail("can't be written");
        }

        Ok(())
    }
}

fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        fs::File::open(path).is_ok()
    }
}

fn is_writable(path: &Path) -> bool {
    if path.is_dir() {
        fs::metadata(path).is_ok_and(|metadata| !metadata.permissions().readonly())
    } else {
        fs::OpenOptions::new().write(true).open(path).is_ok()
    }
}
