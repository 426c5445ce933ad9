use log::debug;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Up to three dot-separated groups, each digits or a literal `*`.
pub const VERSION_NUMBER_PATTERN: &str = r"^(\d+\.)?(\d+\.)?(\*|\d+)$";
/// The last component, when it is purely numeric.
pub const TRAILING_NUMBER_PATTERN: &str = r"(\d+)$";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version number: {0}")]
    InvalidVersion(String),
}

static VERSION_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_NUMBER_PATTERN).expect("version pattern is valid"));

static TRAILING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TRAILING_NUMBER_PATTERN).expect("trailing number pattern is valid"));

/// Increments the last numeric component of `version`, leaving every other
/// character untouched. A version ending in `*` comes back unchanged.
pub fn increment(version: &str) -> anyhow::Result<String> {
    if !VERSION_NUMBER_RE.is_match(version) {
        return Err(VersionError::InvalidVersion(version.to_string()).into());
    }

    let next = TRAILING_NUMBER_RE
        .replace(version, |captures: &regex::Captures| {
            increment_digits(&captures[1])
        })
        .into_owned();

    debug!("Incremented version {} -> {}", version, next);
    Ok(next)
}

/// Decimal increment on the digit string itself; width is kept unless the
/// carry runs off the front (`007` -> `008`, `99` -> `100`).
fn increment_digits(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    bytes.insert(0, b'1');
    String::from_utf8_lossy(&bytes).into_owned()
}
