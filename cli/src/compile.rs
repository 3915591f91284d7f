use std::io;
use std::path::Path;

use thiserror::Error;

const SOURCE_EXTENSION: &str = ".lpml";
const OUTPUT_EXTENSION: &str = ".html";

/// Fatal errors of a single compile run.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The input path does not end in `.lpml`.
    #[error("input file must have a .lpml extension: {0}")]
    WrongExtension(String),

    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Parsing recorded errors; they have already been reported as diagnostics.
    #[error("{0} parse error(s), no output written")]
    Parse(usize),
}

pub fn check_extension(path: &str) -> Result<(), CompileError> {
    if path.ends_with(SOURCE_EXTENSION) {
        Ok(())
    } else {
        Err(CompileError::WrongExtension(path.to_string()))
    }
}

/// `page.lpml` -> `page.html`, next to the input.
pub fn default_output_path(input: &str) -> String {
    let stem = input.strip_suffix(SOURCE_EXTENSION).unwrap_or(input);
    format!("{}{}", stem, OUTPUT_EXTENSION)
}

/// Read an LPML source file, rejecting other extensions before touching the disk.
pub fn read_source(path: &str) -> Result<String, CompileError> {
    check_extension(path)?;
    std::fs::read_to_string(path).map_err(|source| CompileError::Read {
        path: path.to_string(),
        source,
    })
}

pub fn write_output(path: &str, html: &str) -> Result<(), CompileError> {
    log::debug!("writing {} bytes to {}", html.len(), path);
    std::fs::write(Path::new(path), html).map_err(|source| CompileError::Write {
        path: path.to_string(),
        source,
    })
}
