use std::io::{self, BufRead};
use std::str::FromStr;
use std::sync::OnceLock;

use ::regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::array::AssociativeArray;

#[derive(Debug, Error)]
pub enum PairFileError {
    #[error(transparent)]
    IoError(#[from] io::Error)
}

static PARSER: OnceLock<Regex> = OnceLock::new();

/// Matches `key: value` and `key = value`, capturing both sides trimmed.
pub fn get_parser() -> &'static Regex {
    PARSER.get_or_init(|| RegexBuilder::new(r"^
        \s*
        (?<key>[^\s:=](?:[^:=]*[^\s:=])?)
        \s*[:=]\s*
        (?<value>.*?)
        \s*
        $")
        .ignore_whitespace(true).build().unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairLine {
    pub key: String,
    pub value: String
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Line is not a `key: value` pair")]
pub struct ParsePairError;

impl FromStr for PairLine {
    type Err = ParsePairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = get_parser().captures(s).ok_or(ParsePairError)?;
        Ok(PairLine {
            key  : line["key"  ].to_string(),
            value: line["value"].to_string()
        })
    }
}

fn is_ignored(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}

/// Reads a pair file into an array, in file order, so a repeated key keeps its last value.
///
/// Blank lines and `#` comments are skipped. Lines that aren't pairs are logged and skipped.
pub fn read_pairs<R: BufRead>(reader: R) -> Result<AssociativeArray<String, String>, PairFileError> {
    let mut ret = AssociativeArray::new();
    let mut skipped = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if is_ignored(&line) {continue;}
        match PairLine::from_str(&line) {
            Ok(PairLine {key, value}) => {ret.set(key, value);},
            Err(e) => {
                log::warn!("Line {} not parsed ({e}): {line}", i+1);
                skipped += 1;
            }
        }
    }

    log::debug!("Read {} pairs, skipped {skipped} lines", ret.size());
    Ok(ret)
}
