use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single typed cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, as produced by the loaders.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Strict numeric view: only cells that were typed as numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Coerce the cell to a finite real number.
    ///
    /// Numbers pass through, booleans become 1/0 and numeric-looking text is
    /// parsed. `Null`, non-numeric text and non-finite values yield `None`.
    pub fn coerce_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::Bool(b) => f64::from(u8::from(*b)),
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Null => return None,
        };
        value.is_finite().then_some(value)
    }

    /// `Null` or empty text.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Value of a cell in a binary 0/1 column; missing counts as 0.
    /// Returns `None` for anything else.
    pub fn as_binary(&self) -> Option<f64> {
        if self.is_missing() {
            return Some(0.0);
        }
        match self.as_number() {
            Some(v) if v == 0.0 || v == 1.0 => Some(v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Row / Table
// ---------------------------------------------------------------------------

/// One record: column_name → value. Absent keys mean "no value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Row {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A loaded table with its column order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<Row>,
    /// Header order, followed by any extra keys in first-seen order.
    pub column_names: Vec<String>,
}

impl Table {
    /// Build a table from a header and its rows. Keys missing from the
    /// header are appended so the column set is the union over all rows.
    pub fn from_rows(header: Vec<String>, rows: Vec<Row>) -> Self {
        let mut column_names = header;
        for row in &rows {
            for key in row.cells.keys() {
                if !column_names.contains(key) {
                    column_names.push(key.clone());
                }
            }
        }
        Table { rows, column_names }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// The first `n` rows.
    pub fn preview(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Cells of one column, row-aligned; `None` where a row lacks the key.
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        self.rows.iter().map(move |r| r.get(column))
    }
}
