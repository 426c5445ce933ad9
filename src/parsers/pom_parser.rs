use crate::parsers::Parser;
use regex::bytes::Regex;
use std::sync::LazyLock;

pub const VERSION_FILE: &str = "pom.xml";
pub const FIND_VERSION_PATTERN: &str =
    r"^\s*<version>(.*)</version>\s* <!-- PROJECT\.VERSION \(Keep this tag\) -->$";

static FIND_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FIND_VERSION_PATTERN).expect("declaration pattern is valid"));

pub struct PomParser;

impl Parser for PomParser {
    fn version_match_regex() -> &'static Regex {
        &FIND_VERSION_RE
    }

    fn manifest_file_name() -> &'static str {
        VERSION_FILE
    }
}
