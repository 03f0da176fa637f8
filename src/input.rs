//! Gathering raw link input from pasted text, files and stdin.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use glob::glob;
use tracing::warn;

use crate::error::Result;

/// Domain a pasted line must mention to be kept.
pub const DRIVE_DOMAIN: &str = "drive.google.com";

/// Keep only pasted lines that mention the Drive domain.
pub fn filter_pasted(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.contains(DRIVE_DOMAIN))
        .map(str::to_string)
        .collect()
}

/// Expand `{a,b}` alternatives, e.g. `links_{1,2}.txt` into
/// `links_1.txt` and `links_2.txt`. Successive groups expand left to right.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(start) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(len) = pattern[start..].find('}') else {
        return vec![pattern.to_string()];
    };
    let end = start + len;
    let (prefix, suffix) = (&pattern[..start], &pattern[end + 1..]);

    pattern[start + 1..end]
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt.trim(), suffix)))
        .collect()
}

/// Resolve file patterns (glob + braces) to existing files.
///
/// Patterns keep the order they were given in; the matches of a single
/// glob are sorted. A file matched twice is read once, at its first
/// position. A pattern matching nothing is treated as a literal path.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        for expanded in expand_braces(pattern) {
            let mut matches: Vec<PathBuf> = glob(&expanded)?
                .filter_map(|entry| entry.ok())
                .filter(|path| path.is_file())
                .collect();

            if matches.is_empty() {
                let literal = PathBuf::from(&expanded);
                if literal.is_file() {
                    matches.push(literal);
                } else {
                    warn!(pattern = %expanded, "no input files matched");
                }
            }

            matches.sort();
            for path in matches {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}

/// Join argument URLs and the contents of matched files into one input
/// text, one URL per line, in the order given.
pub fn collect_input(urls: &[String], patterns: &[String]) -> Result<String> {
    let mut lines: Vec<String> = urls.to_vec();
    for path in resolve_patterns(patterns)? {
        lines.push(fs::read_to_string(&path)?);
    }
    Ok(lines.join("\n"))
}

pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
