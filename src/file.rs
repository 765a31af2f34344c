// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    path::Path,
};

use crate::error::EmitError;

/// Create (or truncate) an output file, making parent directories as needed.
pub fn create_truncating(path: &Path) -> Result<File, EmitError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|source| EmitError::Path { path: path.to_path_buf(), source })
}

pub fn ensure_directory(dir: &Path) -> Result<(), EmitError> {
    let fail = |source| EmitError::Path { path: dir.to_path_buf(), source };
    if dir.exists() && !dir.is_dir() {
        return Err(fail(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "path exists but is not a directory",
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(fail)?; }
    Ok(())
}
