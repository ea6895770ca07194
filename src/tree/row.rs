use compact_str::CompactString;

use crate::error::RowError;

/// One input row, before tree construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    /// Group keys from the outermost level down to the row's own name
    pub path: Vec<CompactString>,
    /// Primary measure (summed)
    pub weight: f64,
    /// Secondary measure (averaged)
    pub value: f64,
}

impl PivotRow {
    pub fn new<S: AsRef<str>>(path: &[S], weight: f64, value: f64) -> Self {
        Self {
            path: path.iter().map(|s| CompactString::new(s.as_ref())).collect(),
            weight,
            value,
        }
    }
}

/// Parse tab-separated `group/sub/name<TAB>weight<TAB>value` rows.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_rows(text: &str) -> Result<Vec<PivotRow>, RowError> {
    let mut rows = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split('\t').collect();
        if fields.len() != 3 {
            return Err(RowError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let path: Vec<CompactString> = fields[0]
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(CompactString::new)
            .collect();
        if path.is_empty() {
            return Err(RowError::EmptyPath { line });
        }

        let weight = parse_number(line, "weight", fields[1])?;
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(RowError::NegativeWeight { line, value: weight });
        }
        let value = parse_number(line, "value", fields[2])?;

        rows.push(PivotRow { path, weight, value });
    }
    Ok(rows)
}

fn parse_number(line: usize, field: &'static str, text: &str) -> Result<f64, RowError> {
    text.trim().parse::<f64>().map_err(|_| RowError::Number {
        line,
        field,
        text: text.trim().to_string(),
    })
}
