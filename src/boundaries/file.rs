//! Two-line boundary files.
//!
//! The first line holds the lower boundary `b_1, ..., b_n`, the second the upper boundary
//! `B_1, ..., B_n`. Values are comma separated; an empty or missing line means no constraint.
//!
//! ```text
//! 0, 0.15, 0.5
//! 0.3, 0.7, 0.9, 1
//! ```

use std::path::Path;

use super::BoundaryPair;
use crate::core::{CrossingError, CrossingResult};

/// Parses the boundary file format. Values are not validated here.
pub fn parse_boundaries(text: &str) -> CrossingResult<BoundaryPair> {
    let mut lines = text.lines();
    let lower = parse_line(lines.next().unwrap_or(""), 1)?;
    let upper = parse_line(lines.next().unwrap_or(""), 2)?;

    if let Some((offset, extra)) = lines.enumerate().find(|(_, line)| !line.trim().is_empty()) {
        return Err(CrossingError::Parse(format!(
            "line {}: unexpected content after the two boundary lines: {:?}",
            offset + 3,
            extra.trim()
        )));
    }
    Ok(BoundaryPair { lower, upper })
}

/// Reads and parses a boundary file, then validates both boundaries.
pub fn read_boundaries_file(path: impl AsRef<Path>) -> CrossingResult<BoundaryPair> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|err| CrossingError::Io(format!("{}: {err}", path.display())))?;
    let pair = parse_boundaries(&text)?;
    pair.validate()?;
    Ok(pair)
}

fn parse_line(line: &str, line_no: usize) -> CrossingResult<Vec<f64>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }
    // A single trailing comma is tolerated.
    let line = line.strip_suffix(',').unwrap_or(line);

    line.split(',')
        .enumerate()
        .map(|(column, field)| {
            let field = field.trim();
            field.parse::<f64>().map_err(|err| {
                CrossingError::Parse(format!(
                    "line {line_no}, entry {}: cannot parse {field:?} as a number ({err})",
                    column + 1
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_lines_with_whitespace_and_trailing_commas() {
        let pair = parse_boundaries("0, 0.15 ,0.5,\n 0.3,0.7,0.9,1 \n").unwrap();
        assert_eq!(pair.lower, vec![0.0, 0.15, 0.5]);
        assert_eq!(pair.upper, vec![0.3, 0.7, 0.9, 1.0]);
    }

    #[test]
    fn empty_lines_are_unconstrained() {
        let pair = parse_boundaries("\n0.5, 0.7\n").unwrap();
        assert!(pair.lower.is_empty());
        assert_eq!(pair.upper, vec![0.5, 0.7]);

        let only_lower = parse_boundaries("0.2").unwrap();
        assert_eq!(only_lower.lower, vec![0.2]);
        assert!(only_lower.upper.is_empty());

        assert_eq!(parse_boundaries("").unwrap(), BoundaryPair::default());
    }

    #[test]
    fn malformed_entries_report_their_position() {
        let err = parse_boundaries("0.1, 0.2\n0.3, abc\n").unwrap_err();
        match err {
            CrossingError::Parse(msg) => {
                assert!(msg.contains("line 2"), "{msg}");
                assert!(msg.contains("entry 2"), "{msg}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(parse_boundaries("0.1,,0.2\n").is_err());
        assert!(parse_boundaries("0.1\n0.2\n0.3\n").is_err());
    }
}
