//! Row-major table with named, ordered columns.
//!
//! Only the reshaping the collectors need is provided: building from
//! records, adding columns, and the wide-to-long `melt`.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Attrs, Value};
use netchart_error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Empty table with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut table = Self::default();
        for column in columns {
            let column = column.into();
            if table.has_column(&column) {
                return Err(Error::duplicate_column(column).with_operation("table::new"));
            }
            table.columns.push(column);
        }
        Ok(table)
    }

    /// Build from records. Columns are the union of record keys in
    /// first-seen order; keys a record lacks become `null`.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Attrs>,
    {
        let records: Vec<Attrs> = records.into_iter().collect();

        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for record in &records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Row as a record keyed by column name.
    pub fn record(&self, row: usize) -> Option<Attrs> {
        let values = self.rows.get(row)?;
        Some(self.columns.iter().cloned().zip(values.iter().cloned()).collect())
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::new(
                ErrorKind::LengthMismatch,
                format!(
                    "row has {} values, table has {} columns",
                    row.len(),
                    self.columns.len()
                ),
            )
            .with_operation("table::push_row"));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a column. `values` must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        self.check_new_column(&name, values.len(), "table::push_column")?;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        self.columns.push(name);
        Ok(())
    }

    /// Replace the cells of `name`, or append it when the table lacks it.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        let Some(idx) = self.column_index(&name) else {
            return self.push_column(name, values);
        };
        if values.len() != self.rows.len() {
            return Err(Error::new(
                ErrorKind::LengthMismatch,
                format!(
                    "column has {} values, table has {} rows",
                    values.len(),
                    self.rows.len()
                ),
            )
            .with_operation("table::set_column")
            .with_context("column", name));
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
        Ok(())
    }

    /// Insert a 0-based row index as the first column.
    pub fn insert_index_column(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.check_new_column(&name, self.rows.len(), "table::insert_index_column")?;
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.insert(0, Value::from(i));
        }
        self.columns.insert(0, name);
        Ok(())
    }

    pub fn rename_column(&mut self, from: &str, to: impl Into<String>) -> Result<()> {
        let to = to.into();
        let idx = self
            .column_index(from)
            .ok_or_else(|| Error::column_not_found(from).with_operation("table::rename_column"))?;
        if to != from && self.has_column(&to) {
            return Err(Error::duplicate_column(to).with_operation("table::rename_column"));
        }
        self.columns[idx] = to;
        Ok(())
    }

    /// Reshape wide to long.
    ///
    /// Every `value_vars` column becomes rows tagged in `var_name` with the
    /// cell in `value_name`; `id_vars` columns repeat on each of those rows.
    /// Output columns are `id_vars ++ [var_name, value_name]`. Rows are
    /// grouped by variable: all rows for the first value column, then all
    /// rows for the second, each group in source row order.
    pub fn melt(
        &self,
        id_vars: &[&str],
        value_vars: &[&str],
        var_name: &str,
        value_name: &str,
    ) -> Result<Table> {
        let lookup = |name: &str| {
            self.column_index(name)
                .ok_or_else(|| Error::column_not_found(name).with_operation("table::melt"))
        };
        let id_idx = id_vars.iter().map(|&c| lookup(c)).collect::<Result<Vec<_>>>()?;
        let value_idx = value_vars
            .iter()
            .map(|&c| lookup(c))
            .collect::<Result<Vec<_>>>()?;

        let columns = id_vars
            .iter()
            .copied()
            .chain([var_name, value_name])
            .map(str::to_string);
        let mut out = Table::new(columns).map_err(|e| e.with_operation("table::melt"))?;

        out.rows.reserve(self.rows.len() * value_vars.len());
        for (&var, &vi) in value_vars.iter().zip(&value_idx) {
            for row in &self.rows {
                let mut long: Vec<Value> = id_idx.iter().map(|&i| row[i].clone()).collect();
                long.push(Value::from(var));
                long.push(row[vi].clone());
                out.rows.push(long);
            }
        }
        Ok(out)
    }

    pub fn to_records(&self) -> Vec<Attrs> {
        (0..self.rows.len()).filter_map(|i| self.record(i)).collect()
    }

    fn check_new_column(&self, name: &str, len: usize, operation: &'static str) -> Result<()> {
        if self.has_column(name) {
            return Err(Error::duplicate_column(name).with_operation(operation));
        }
        if len != self.rows.len() {
            return Err(Error::new(
                ErrorKind::LengthMismatch,
                format!("column has {} values, table has {} rows", len, self.rows.len()),
            )
            .with_operation(operation)
            .with_context("column", name));
        }
        Ok(())
    }
}

struct RowRef<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Serializes as an array of records, the shape Vega-Lite `values` expects.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows.iter().map(|values| RowRef {
            columns: &self.columns,
            values,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn wide() -> Table {
        Table::from_records([
            attrs([("source", json!("A")), ("target", json!("B")), ("w", json!(1))]),
            attrs([("source", json!("B")), ("target", json!("C")), ("w", json!(2))]),
        ])
    }

    #[test]
    fn test_from_records_unions_columns() {
        let t = Table::from_records([attrs([("a", 1)]), attrs([("b", 2), ("a", 3)])]);
        assert_eq!(t.columns(), ["a", "b"]);
        assert_eq!(t.cell(0, "b"), Some(&Value::Null));
        assert_eq!(t.cell(1, "a"), Some(&json!(3)));
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let err = Table::new(["a", "a"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateColumn);
    }

    #[test]
    fn test_insert_index_column() {
        let mut t = wide();
        t.insert_index_column("edge_id").unwrap();
        assert_eq!(t.columns(), ["edge_id", "source", "target", "w"]);
        assert_eq!(t.column("edge_id").unwrap(), [&json!(0), &json!(1)]);
    }

    #[test]
    fn test_push_column_checks_length() {
        let mut t = wide();
        let err = t.push_column("x", vec![json!(1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);

        let err = t.push_column("w", vec![json!(1), json!(2)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateColumn);

        t.push_column("x", vec![json!(0.5), json!(1.5)]).unwrap();
        assert_eq!(t.cell(1, "x"), Some(&json!(1.5)));
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut t = wide();
        t.set_column("w", vec![json!(10), json!(20)]).unwrap();
        assert_eq!(t.columns(), ["source", "target", "w"]);
        assert_eq!(t.column("w").unwrap(), [&json!(10), &json!(20)]);

        t.set_column("z", vec![json!(0), json!(1)]).unwrap();
        assert_eq!(t.columns(), ["source", "target", "w", "z"]);

        let err = t.set_column("w", vec![json!(1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        assert_eq!(err.operation(), "table::set_column");
    }

    #[test]
    fn test_rename_column() {
        let mut t = wide();
        t.rename_column("w", "weight").unwrap();
        assert!(t.has_column("weight"));
        assert_eq!(
            t.rename_column("missing", "z").unwrap_err().kind(),
            ErrorKind::ColumnNotFound
        );
        assert_eq!(
            t.rename_column("source", "target").unwrap_err().kind(),
            ErrorKind::DuplicateColumn
        );
    }

    #[test]
    fn test_melt_groups_rows_by_variable() {
        let long = wide()
            .melt(&["w"], &["source", "target"], "end", "node_id")
            .unwrap();

        assert_eq!(long.columns(), ["w", "end", "node_id"]);
        assert_eq!(
            long.rows(),
            [
                vec![json!(1), json!("source"), json!("A")],
                vec![json!(2), json!("source"), json!("B")],
                vec![json!(1), json!("target"), json!("B")],
                vec![json!(2), json!("target"), json!("C")],
            ]
        );
    }

    #[test]
    fn test_melt_unknown_column() {
        let err = wide().melt(&["nope"], &["source"], "end", "v").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ColumnNotFound);
        assert_eq!(err.operation(), "table::melt");
    }

    #[test]
    fn test_melt_name_collision() {
        let err = wide().melt(&["w"], &["source"], "w", "v").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateColumn);
    }

    #[test]
    fn test_serialize_as_records() {
        let t = Table::from_records([attrs([("b", 1), ("a", 2)])]);
        let text = serde_json::to_string(&t).unwrap();
        assert_eq!(text, r#"[{"b":1,"a":2}]"#);
        assert_eq!(t.to_records()[0].get("a"), Some(&json!(2)));
    }
}
