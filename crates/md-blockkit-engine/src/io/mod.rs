use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Read Markdown from `path`, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<String, IoError> {
    match path {
        Some(path) => read_file(path),
        None => read_from(io::stdin().lock()),
    }
}

/// Read a Markdown file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Read everything from `reader` as UTF-8
pub fn read_from(mut reader: impl Read) -> Result<String, IoError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}
