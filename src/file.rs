// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::{ Error, Result };

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() { return Ok(()); }
    if dir.exists() && !dir.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?; }
    Ok(())
}

/// Create/truncate `path` and write one rendered page into it.
/// The parent directory is created when missing.
pub fn write_page(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    out.write_all(contents.as_bytes()).map_err(|e| Error::io(path, e))?;
    out.flush().map_err(|e| Error::io(path, e))?;
    Ok(path.to_path_buf())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}
