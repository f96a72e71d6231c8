//! Panel corner survey files
//!
//! One panel per line: an optional name followed by twelve numbers, the
//! x, y, z of p1 (lower-left), p2 (upper-left), p3 (upper-right) and
//! p4 (lower-right). Fields may be separated by commas, whitespace or both.
//! A leading field that is not a finite number is the name, so panels may be
//! called `inf` or `nan`. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # name, p1x, p1y, p1z, p2x, ...
//! bank1, 0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 0, 0
//! ```

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::coordinates::Vector3;
use crate::errors::{GeometryError, Result};

/// Corners read from one survey line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub name: Option<String>,
    pub corners: [Vector3; 4],
}

/// Parses one line; `Ok(None)` for blank and comment lines
pub fn parse_corner_line(line: &str) -> Result<Option<PanelRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut fields: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    let name = match fields.first() {
        Some(first) if !first.parse::<f64>().is_ok_and(f64::is_finite) => {
            Some(fields.remove(0).to_string())
        }
        _ => None,
    };

    let values = fields
        .iter()
        .map(|f| match f.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(value) => Err(GeometryError::Parse(format!(
                "coordinate {:?} is not finite ({})",
                f, value
            ))),
            Err(e) => Err(GeometryError::Parse(format!("invalid number {:?}: {}", f, e))),
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != 12 {
        return Err(GeometryError::Parse(format!(
            "expected 12 coordinates, found {}",
            values.len()
        )));
    }

    let corner = |n: usize| Vector3::new(values[3 * n], values[3 * n + 1], values[3 * n + 2]);
    Ok(Some(PanelRecord {
        name,
        corners: [corner(0), corner(1), corner(2), corner(3)],
    }))
}

/// Reads every panel of a survey file
///
/// Errors carry the 1-based line number of the offending line.
pub fn read_panels<R: BufRead>(reader: R) -> Result<Vec<PanelRecord>> {
    let mut panels = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| GeometryError::Parse(format!("line {}: {}", index + 1, e)))?;
        match parse_corner_line(&line) {
            Ok(Some(record)) => panels.push(record),
            Ok(None) => {}
            Err(GeometryError::Parse(msg)) => {
                return Err(GeometryError::Parse(format!("line {}: {}", index + 1, msg)))
            }
            Err(other) => return Err(other),
        }
    }
    log::debug!("read {} panels", panels.len());
    Ok(panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_named_comma_line() {
        let record = parse_corner_line("bank1, 0,0,0, 0,1,0, 1,1,0, 1,0,0")
            .unwrap()
            .unwrap();
        assert_eq!(record.name.as_deref(), Some("bank1"));
        assert_eq!(record.corners[2], [1.0, 1.0, 0.0]);
        assert_eq!(record.corners[3], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unnamed_whitespace_line() {
        let record = parse_corner_line("  0 0 0\t0 1 0  1 1 0 1 0 -2.5e-1 ")
            .unwrap()
            .unwrap();
        assert!(record.name.is_none());
        assert_eq!(record.corners[3], [1.0, 0.0, -0.25]);
    }

    #[test]
    fn test_skipped_lines() {
        assert_eq!(parse_corner_line("").unwrap(), None);
        assert_eq!(parse_corner_line("   ").unwrap(), None);
        assert_eq!(parse_corner_line("# header").unwrap(), None);
    }

    #[test]
    fn test_bad_lines() {
        assert!(matches!(
            parse_corner_line("0 0 0 1 1 1"),
            Err(GeometryError::Parse(_))
        ));
        assert!(matches!(
            parse_corner_line("name 0 0 0 x 1 0 1 1 0 1 0 0"),
            Err(GeometryError::Parse(_))
        ));
    }

    #[rstest]
    #[case("inf")]
    #[case("NaN")]
    #[case("-infinity")]
    fn test_non_numeric_names(#[case] name: &str) {
        let line = format!("{} 0 0 0 0 1 0 1 1 0 1 0 0", name);
        let record = parse_corner_line(&line).unwrap().unwrap();
        assert_eq!(record.name.as_deref(), Some(name));
        assert_eq!(record.corners[1], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        for line in [
            "a 0 0 0 0 1 0 1 1 nan 1 0 0",
            "0 0 0 0 1 0 1 1 0 1 0 inf",
            "b, 0,0,0, 0,1e999,0, 1,1,0, 1,0,0",
        ] {
            match parse_corner_line(line) {
                Err(GeometryError::Parse(msg)) => assert!(msg.contains("not finite"), "{}", msg),
                other => panic!("{:?} for {}", other, line),
            }
        }
    }

    #[test]
    fn test_read_panels_reports_line() {
        let text = "# corners\nA 0 0 0 0 1 0 1 1 0 1 0 0\n\nB 1 2 3\n";
        let err = read_panels(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 4"), "{}", err);

        let text = "A 0 0 0 0 1 0 1 1 0 1 0 0\nB 0 0 1 0 1 1 1 1 1 1 0 1\n";
        let panels = read_panels(text.as_bytes()).unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[1].name.as_deref(), Some("B"));
    }
}
