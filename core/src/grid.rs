//! Tabular presentation model: a titled set of string cells.
//!
//! Pages produce a `Grid`; the grid owns local quick-filtering, column
//! sorting and plain-text rendering.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with blanks.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Cell value by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| cell_at(r, col))
    }

    /// Keep rows where any cell contains `needle`, case-insensitively.
    pub fn quick_filter(&self, needle: &str) -> Grid {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        Grid {
            title: self.title.clone(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.iter().any(|cell| cell.to_lowercase().contains(&needle)))
                .cloned()
                .collect(),
        }
    }

    /// Stable sort by one column. Numbers (including money) compare
    /// numerically, everything else lexically; blank cells always go last.
    /// Returns `false` when the column does not exist.
    pub fn sort_by(&mut self, column: &str, direction: SortDirection) -> bool {
        let Some(col) = self.column_index(column) else {
            return false;
        };
        self.rows.sort_by(|a, b| {
            let (a, b) = (cell_at(a, col), cell_at(b, col));
            match (a.is_empty(), b.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = compare_cells(a, b);
                    match direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    }
                }
            }
        });
        true
    }
}

/// Missing cells read as blank.
fn cell_at(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

fn numeric_value(cell: &str) -> Option<f64> {
    let cleaned: String = cell.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    cleaned.parse::<f64>().ok()
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        writeln!(f, "{} ({} rows)", self.title, self.rows.len())?;
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };
        writeln!(f, "{}", line(&self.columns))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("  "))?;
        for row in &self.rows {
            writeln!(f, "{}", line(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        let mut g = Grid::new("Rigs", &["Rig", "Day Rate", "Status"]);
        g.push_row(vec!["Borr Gerd".into(), "$120,000".into(), "active".into()]);
        g.push_row(vec!["Atlas".into(), "$95,000".into(), "standby".into()]);
        g.push_row(vec!["Zephyr".into(), String::new(), "maintenance".into()]);
        g.push_row(vec!["Nomad".into(), "$1,100,000".into()]);
        g
    }

    #[test]
    fn short_rows_are_padded() {
        let g = grid();
        assert_eq!(g.cell(3, "status"), Some(""));
    }

    #[test]
    fn rows_set_directly_may_be_short() {
        let mut g = Grid::new("Wells", &["Well", "Depth"]);
        g.rows = vec![vec!["Deep".into(), "3200".into()], vec!["Stub".into()], vec![]];
        assert_eq!(g.cell(1, "Depth"), Some(""));
        assert_eq!(g.cell(2, "Well"), Some(""));
        assert!(g.sort_by("Depth", SortDirection::Descending));
        assert_eq!(g.cell(0, "Well"), Some("Deep"));
        assert!(g.sort_by("Well", SortDirection::Ascending));
        assert_eq!(g.cell(0, "Well"), Some("Deep"));
        assert_eq!(g.cell(2, "Well"), Some(""));
    }

    #[test]
    fn quick_filter_matches_any_cell() {
        let g = grid();
        let filtered = g.quick_filter("STANDBY");
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.cell(0, "Rig"), Some("Atlas"));
        assert_eq!(g.quick_filter("  ").rows.len(), 4);
    }

    #[test]
    fn sort_money_numerically_with_blanks_last() {
        let mut g = grid();
        assert!(g.sort_by("day rate", SortDirection::Ascending));
        let names: Vec<&str> = (0..4).map(|i| g.cell(i, "Rig").unwrap()).collect();
        assert_eq!(names, vec!["Atlas", "Borr Gerd", "Nomad", "Zephyr"]);

        assert!(g.sort_by("Day Rate", SortDirection::Descending));
        let names: Vec<&str> = (0..4).map(|i| g.cell(i, "Rig").unwrap()).collect();
        assert_eq!(names, vec!["Nomad", "Borr Gerd", "Atlas", "Zephyr"]);
    }

    #[test]
    fn sort_text_case_insensitively() {
        let mut g = grid();
        g.sort_by("Rig", SortDirection::Ascending);
        assert_eq!(g.cell(0, "Rig"), Some("Atlas"));
        assert!(!g.sort_by("Nope", SortDirection::Ascending));
    }

    #[test]
    fn renders_padded_columns() {
        let mut g = Grid::new("Fields", &["Name", "ID"]);
        g.push_row(vec!["Alpha".into(), "1".into()]);
        let text = g.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Fields (1 rows)");
        assert_eq!(lines[1], "Name   ID");
        assert_eq!(lines[2], "-----  --");
        assert_eq!(lines[3], "Alpha  1");
    }
}
