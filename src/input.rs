//! Loading tagged paths.
//!
//! Two formats are accepted. The text format has one pada per line, with
//! candidates separated by `|`; a blank line starts a new path:
//!
//! ```text
//! # rAmaH vanam gacCati
//! rAmaH:   rAma{praTamAviBaktiH ekavacanam puMlliNgam}
//! vanam:   vana{praTamAviBaktiH ekavacanam napuMsakaliNgam} | vana{dvitIyAviBaktiH ekavacanam napuMsakaliNgam}
//! gacCati: gam{law ekavacanam praTamapuruzaH}
//! ```
//!
//! The JSON format is an array of paths, each an array of padas:
//!
//! ```text
//! [[{"surface": "rAmaH", "candidates": [{"stem": "rAma", "tags": ["praTamAviBaktiH", ...]}]}]]
//! ```

use crate::tags::{Candidate, Pada, TagSet};
use crate::{MorphError, Result};

/// Parse `source`, picking the JSON format when it starts with `[`.
pub fn parse_paths(source: &str) -> Result<Vec<Vec<Pada>>> {
    if source.trim_start().starts_with('[') { parse_json_paths(source) } else { parse_text_paths(source) }
}

/// Parse the JSON format.
pub fn parse_json_paths(source: &str) -> Result<Vec<Vec<Pada>>> {
    Ok(serde_json::from_str(source)?)
}

/// Parse the line-oriented text format.
pub fn parse_text_paths(source: &str) -> Result<Vec<Vec<Pada>>> {
    let line_re = regex!(r"^\s*([^:\s][^:]*?)\s*:\s*(.*?)\s*$");
    let candidate_re = regex!(r"^\s*([^{}\s]+)\s*\{([^{}]*)\}\s*$");

    let mut paths = Vec::new();
    let mut current: Vec<Pada> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            if !current.is_empty() {
                paths.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let caps = line_re
            .captures(line)
            .ok_or_else(|| MorphError::Input { line: line_no, message: "expected '<surface>: <candidates>'".into() })?;
        let surface = &caps[1];

        let mut candidates = Vec::new();
        for part in caps[2].split('|') {
            if part.trim().is_empty() {
                continue;
            }
            let c = candidate_re.captures(part).ok_or_else(|| MorphError::Input {
                line: line_no,
                message: format!("malformed candidate '{}', expected 'stem{{tag ...}}'", part.trim()),
            })?;
            let labels = c[2].split(|ch: char| ch.is_whitespace() || ch == ',');
            candidates.push(Candidate::new(&c[1], TagSet::from_labels(labels)));
        }

        current.push(Pada::new(surface, candidates));
    }

    if !current.is_empty() {
        paths.push(current);
    }
    Ok(paths)
}
