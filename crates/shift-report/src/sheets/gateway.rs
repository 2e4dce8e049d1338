use async_trait::async_trait;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// One spreadsheet row keyed by column header, in write order.
///
/// Optional fields that were not recorded have no entry at all, which is
/// distinct from an entry holding an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: Vec<(&'static str, Value)>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column`, replacing an earlier value for the same column.
    pub fn set(&mut self, column: &'static str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
        self
    }

    pub fn set_optional(&mut self, column: &'static str, value: Option<Value>) -> &mut Self {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(name, _)| *name)
    }
}

impl Serialize for SheetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("sheets request failed: {0}")]
    Backend(String),
    #[error("sheet '{0}' has no header row")]
    MissingHeader(String),
    #[error("sheets client unavailable: {0}")]
    Client(String),
}

/// Append-only table store the submission service writes through.
///
/// Calls are independent; the store offers no transaction spanning them.
#[async_trait]
pub trait SheetGateway: Send + Sync {
    async fn append_rows(&self, table: &str, rows: Vec<SheetRow>) -> Result<(), SheetError>;

    async fn append_row(&self, table: &str, row: SheetRow) -> Result<(), SheetError> {
        self.append_rows(table, vec![row]).await
    }
}
