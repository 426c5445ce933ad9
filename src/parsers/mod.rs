use anyhow::{Context, Result};
use log::{debug, info};
use regex::bytes::{NoExpand, Regex};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

pub mod pom_parser;

#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("Couldn't find the version number in file {0}")]
    NoVersionFoundError(String),
    #[error("Version check failed for {path}: expected {expected}, found {found}")]
    VerificationError {
        path: String,
        expected: String,
        found: String,
    },
}

/// A manifest carrying a single version declaration line.
pub trait Parser {
    /// Returns the version captured from the first declaration line.
    fn get_current_version(path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let contents = read_manifest(path)?;

        for (_, body) in declaration_lines(&contents) {
            if let Some(captures) = Self::version_match_regex().captures(body) {
                if let Some(version) = captures.get(1) {
                    let version = std::str::from_utf8(version.as_bytes())?;
                    debug!("Found current version: {}", version);
                    return Ok(version.to_string());
                }
            }
        }

        Err(ParsingError::NoVersionFoundError(path.display().to_string()).into())
    }

    /// Reads the current version and computes its successor, returning `(old, new)`.
    fn next_version(path: impl AsRef<Path>) -> Result<(String, String)> {
        let current_version = Self::get_current_version(path)?;
        let new_version = crate::version::increment(&current_version)?;
        debug!(
            "Incrementing version from {} -> {}",
            current_version, new_version
        );
        Ok((current_version, new_version))
    }

    /// Rewrites every declaration line, swapping the first occurrence of
    /// `old_version` for `new_version`, then re-reads the file to confirm.
    /// Every other line is copied back byte-for-byte.
    fn replace_version(path: impl AsRef<Path>, old_version: &str, new_version: &str) -> Result<()> {
        let path = path.as_ref();
        info!("Updating version in '{}' to {}", path.display(), new_version);

        let contents = read_manifest(path)?;
        let old_regex = Regex::new(&regex::escape(old_version))?;

        let mut new_contents = Vec::with_capacity(contents.len());
        for (line, body) in declaration_lines(&contents) {
            if Self::version_match_regex().is_match(body) {
                debug!("Rewriting line: {}", String::from_utf8_lossy(body));
                let replaced = old_regex.replacen(line, 1, NoExpand(new_version.as_bytes()));
                new_contents.extend_from_slice(&replaced);
            } else {
                new_contents.extend_from_slice(line);
            }
        }

        write_atomically(path, &new_contents)?;

        let detected_version = Self::get_current_version(path)?;
        if detected_version != new_version {
            return Err(ParsingError::VerificationError {
                path: path.display().to_string(),
                expected: new_version.to_string(),
                found: detected_version,
            }
            .into());
        }
        debug!("Verified version {} in '{}'", detected_version, path.display());
        Ok(())
    }

    /// Library entry point bundling [`Parser::next_version`] and
    /// [`Parser::replace_version`]. The binary calls the two separately so it
    /// can report the new version before touching the file.
    fn increment_version(path: impl AsRef<Path>) -> Result<(String, String)> {
        let path = path.as_ref();
        let (current_version, new_version) = Self::next_version(path)?;
        Self::replace_version(path, &current_version, &new_version)?;
        Ok((current_version, new_version))
    }

    /// Matches a whole declaration line with its terminator removed; group 1 is the version.
    fn version_match_regex() -> &'static Regex;
    fn manifest_file_name() -> &'static str;
}

fn read_manifest(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Splits `contents` into `(line, body)` pairs: `line` keeps its terminator,
/// `body` drops the `\n` and at most one `\r` before it.
pub fn declaration_lines(contents: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
    contents.split_inclusive(|&byte| byte == b'\n').map(|line| {
        let body = line.strip_suffix(b"\n").unwrap_or(line);
        let body = body.strip_suffix(b"\r").unwrap_or(body);
        (line, body)
    })
}

/// Replaces `path` with `contents` through a sibling temp file, keeping the
/// original permissions.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();

    let mut temp_file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;
    fs::set_permissions(temp_file.path(), permissions)?;
    temp_file
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!("Wrote {} bytes to '{}'", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_lines_strips_lf_and_crlf() {
        let lines: Vec<_> = declaration_lines(b"a\nb\r\nc").collect();
        assert_eq!(
            lines,
            vec![
                (&b"a\n"[..], &b"a"[..]),
                (&b"b\r\n"[..], &b"b"[..]),
                (&b"c"[..], &b"c"[..]),
            ]
        );
    }

    #[test]
    fn test_declaration_lines_strips_single_carriage_return() {
        let lines: Vec<_> = declaration_lines(b"a\r\r\n").collect();
        assert_eq!(lines, vec![(&b"a\r\r\n"[..], &b"a\r"[..])]);
    }

    #[test]
    fn test_declaration_lines_empty() {
        assert_eq!(declaration_lines(b"").count(), 0);
    }
}
