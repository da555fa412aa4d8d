use crate::error::{ServeForgeError, SfResult};

/// An ordered set of named columns holding raw string cells.
///
/// This is the shape match files arrive in. Every operation returns a new
/// table, so a stage can never observe another stage's edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<String>>,
    ) -> SfResult<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> SfResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ServeForgeError::missing_column(name))
    }

    /// Resolves several columns at once, failing on the first absent one.
    pub fn column_indices(&self, names: &[&str]) -> SfResult<Vec<usize>> {
        names.iter().map(|n| self.column_index(n)).collect()
    }

    pub fn push_row(&mut self, row: Vec<String>) -> SfResult<()> {
        if row.len() != self.columns.len() {
            return Err(ServeForgeError::Schema(format!(
                "row {} has {} cells but the table has {} columns",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// The cell at (`row`, `column`), or `None` outside the table.
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Projects the table onto `names`, in that order.
    pub fn select(&self, names: &[String]) -> SfResult<Table> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let idx = self.column_indices(&names)?;
        let rows = self
            .rows
            .iter()
            .map(|row| idx.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Table {
            columns: names.iter().map(|s| s.to_string()).collect(),
            rows,
        })
    }

    pub fn rename_columns(&self, rename: impl Fn(&str) -> String) -> Table {
        Table {
            columns: self.columns.iter().map(|c| rename(c)).collect(),
            rows: self.rows.clone(),
        }
    }

    /// Appends a column computed from each row.
    pub fn with_column(
        &self,
        name: &str,
        derive: impl Fn(&[String]) -> SfResult<String>,
    ) -> SfResult<Table> {
        if self.has_column(name) {
            return Err(ServeForgeError::Schema(format!(
                "column '{}' already exists",
                name
            )));
        }
        let mut columns = self.columns.clone();
        columns.push(name.to_string());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = row.clone();
                out.push(derive(row)?);
                Ok(out)
            })
            .collect::<SfResult<Vec<_>>>()?;
        Ok(Table { columns, rows })
    }

    pub fn filter_rows(&self, keep: impl Fn(&[String]) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Row-wise concatenation. Both tables must carry the same columns in the
    /// same order.
    pub fn concat(&self, other: &Table) -> SfResult<Table> {
        if self.columns != other.columns {
            return Err(ServeForgeError::Schema(format!(
                "cannot concatenate tables with different columns: {:?} vs {:?}",
                self.columns, other.columns
            )));
        }
        let mut rows = Vec::with_capacity(self.rows.len() + other.rows.len());
        rows.extend(self.rows.iter().cloned());
        rows.extend(other.rows.iter().cloned());
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }
}
