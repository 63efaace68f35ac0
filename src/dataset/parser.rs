use std::path::Path;

use log::debug;

use super::error::{DatasetError, Result};
use crate::specs::Dataset;

/// Parses comma separated numeric rows into features and labels.
///
/// The last column of every row is its label, the preceding ones its features.
///
/// # Arguments
/// * `text` - One row per line. Blank lines are skipped.
///
/// # Returns
/// The parsed dataset or the first row that breaks the table's shape.
pub fn parse(text: &str) -> Result<Dataset> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut columns = None;

    for (line, row) in text.lines().enumerate() {
        let row = row.trim();
        if row.is_empty() {
            continue;
        }

        let mut values = row
            .split(',')
            .map(|token| {
                parse_number(token).ok_or_else(|| DatasetError::MalformedRow {
                    line,
                    token: token.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let expected = *columns.get_or_insert(values.len());
        if values.len() != expected {
            return Err(DatasetError::InconsistentColumnCount {
                line,
                expected,
                actual: values.len(),
            });
        }

        if expected < 2 {
            return Err(DatasetError::InsufficientColumns { columns: expected });
        }

        // Width is at least 2, so there is always a label to pop.
        if let Some(label) = values.pop() {
            y.push(label);
            x.push(values);
        }
    }

    let Some(columns) = columns else {
        return Err(DatasetError::Empty);
    };

    let num_features = columns - 1;
    debug!(samples = y.len(), num_features = num_features; "parsed dataset");
    Ok(Dataset::from_rows(x, y, num_features))
}

/// Reads and parses a dataset file.
///
/// # Errors
/// An `Io` error if the file cannot be read, otherwise whatever [`parse`] reports.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    parse(&read_file(path)?)
}

/// Reads a dataset file's text without parsing it.
///
/// # Errors
/// An `Io` error naming the path if the file cannot be read.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a single cell, rejecting anything that is not a finite number.
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_features_from_label() {
        let ds = parse("1,2,3\n4,5,6\n").unwrap();
        assert_eq!(ds.x(), &[vec![1.0, 2.0], vec![4.0, 5.0]]);
        assert_eq!(ds.y(), &[3.0, 6.0]);
        assert_eq!(ds.num_features(), 2);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn rows_rebuild_from_features_and_label() {
        let text = "0.5,-1,2e3,7\n1,1,1,1\n-3.25,0,0,9";
        let ds = parse(text).unwrap();

        for ((features, label), line) in ds.x().iter().zip(ds.y()).zip(text.lines()) {
            let mut row = features.clone();
            row.push(*label);
            let original: Vec<f64> = line.split(',').map(|t| t.parse().unwrap()).collect();
            assert_eq!(row, original);
        }
    }

    #[test]
    fn skips_blank_lines_and_trims_whitespace() {
        let ds = parse("\n  1, 2 \n\n\t3,4\t\n   \n").unwrap();
        assert_eq!(ds.x(), &[vec![1.0], vec![3.0]]);
        assert_eq!(ds.y(), &[2.0, 4.0]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let ds = parse("1,2\r\n3,4\r\n").unwrap();
        assert_eq!(ds.y(), &[2.0, 4.0]);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(parse(""), Err(DatasetError::Empty)));
        assert!(matches!(parse(" \n\t\n"), Err(DatasetError::Empty)));
    }

    #[test]
    fn non_numeric_token_names_line_and_token() {
        match parse("1,2\n3,abc\n") {
            Err(DatasetError::MalformedRow { line, token }) => {
                assert_eq!(line, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn nan_and_empty_cells_are_malformed() {
        assert!(matches!(
            parse("1,NaN"),
            Err(DatasetError::MalformedRow { line: 0, .. })
        ));
        assert!(matches!(
            parse("1,inf"),
            Err(DatasetError::MalformedRow { line: 0, .. })
        ));
        assert!(matches!(
            parse("1,,2"),
            Err(DatasetError::MalformedRow { line: 0, .. })
        ));
    }

    #[test]
    fn ragged_rows_fail() {
        match parse("1,2,3\n\n4,5\n") {
            Err(DatasetError::InconsistentColumnCount {
                line,
                expected,
                actual,
            }) => {
                assert_eq!((line, expected, actual), (2, 3, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn single_column_has_no_features() {
        assert!(matches!(
            parse("1\n2\n"),
            Err(DatasetError::InsufficientColumns { columns: 1 })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = parse_file("/nonexistent/trainer-client/data.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
