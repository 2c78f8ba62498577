//! Datasource model shared with the data validation tool
//!
//! These are the shapes a datasource exposes over REST: the table/column
//! catalog, typed cell values, and the paired key/value column data.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared data type of a datasource column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Integer,
    Long,
    String,
    Boolean,
    Double,
    Date,
    DateTime,
    ListOfStrings,
    ListOfIntegers,
    ListOfObjects,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Double => "DOUBLE",
            Self::Date => "DATE",
            Self::DateTime => "DATE_TIME",
            Self::ListOfStrings => "LIST_OF_STRINGS",
            Self::ListOfIntegers => "LIST_OF_INTEGERS",
            Self::ListOfObjects => "LIST_OF_OBJECTS",
        };
        f.write_str(name)
    }
}

/// A table exposed by a datasource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceTable {
    pub name: String,
    pub primary_key: String,
    pub columns: Vec<String>,
}

impl DatasourceTable {
    pub fn new(name: &str, primary_key: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            primary_key: primary_key.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// A typed column of a datasource table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceColumn {
    pub table_name: String,
    pub name: String,
    pub data_type: DataType,
}

impl DatasourceColumn {
    pub fn new(table_name: &str, name: &str, data_type: DataType) -> Self {
        Self {
            table_name: table_name.to_string(),
            name: name.to_string(),
            data_type,
        }
    }

    /// Structural identity of this column
    pub fn column_ref(&self) -> ColumnRef {
        ColumnRef::new(&self.table_name, &self.name)
    }
}

impl fmt::Display for DatasourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({})", self.table_name, self.name, self.data_type)
    }
}

/// Full catalog of a datasource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceMetadata {
    pub tables: Vec<DatasourceTable>,
    pub columns: Vec<DatasourceColumn>,
}

/// Caller-supplied reference to a column, by table and column name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub table_name: String,
    pub column_name: String,
}

impl ColumnRef {
    pub fn new(table_name: &str, column_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            column_name: column_name.to_string(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table_name, self.column_name)
    }
}

/// A single cell value, one variant per [`DataType`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i32),
    Long(i64),
    String(String),
    Boolean(bool),
    Double(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    ListOfStrings(Vec<String>),
    ListOfIntegers(Vec<i32>),
    ListOfObjects(Vec<serde_json::Value>),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Integer(_) => DataType::Integer,
            Self::Long(_) => DataType::Long,
            Self::String(_) => DataType::String,
            Self::Boolean(_) => DataType::Boolean,
            Self::Double(_) => DataType::Double,
            Self::Date(_) => DataType::Date,
            Self::DateTime(_) => DataType::DateTime,
            Self::ListOfStrings(_) => DataType::ListOfStrings,
            Self::ListOfIntegers(_) => DataType::ListOfIntegers,
            Self::ListOfObjects(_) => DataType::ListOfObjects,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

/// Paired key/value result of a column query.
///
/// `keys[i]` and `values[i]` always come from the same source record; the
/// only way to add data is [`ColumnData::push`], which keeps both sequences
/// the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnData {
    key_column: DatasourceColumn,
    data_column: DatasourceColumn,
    keys: Vec<Value>,
    values: Vec<Value>,
}

impl ColumnData {
    pub fn new(key_column: DatasourceColumn, data_column: DatasourceColumn) -> Self {
        Self::with_capacity(key_column, data_column, 0)
    }

    pub fn with_capacity(key_column: DatasourceColumn, data_column: DatasourceColumn, capacity: usize) -> Self {
        Self {
            key_column,
            data_column,
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: Value, value: Value) {
        self.keys.push(key);
        self.values.push(value);
    }

    pub fn key_column(&self) -> &DatasourceColumn {
        &self.key_column
    }

    pub fn data_column(&self) -> &DatasourceColumn {
        &self.data_column
    }

    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_type_wire_names() {
        assert_eq!(serde_json::to_value(DataType::DateTime).unwrap(), json!("DATE_TIME"));
        assert_eq!(serde_json::to_value(DataType::ListOfIntegers).unwrap(), json!("LIST_OF_INTEGERS"));
        assert_eq!(DataType::ListOfObjects.to_string(), "LIST_OF_OBJECTS");
    }

    #[test]
    fn test_column_serializes_camel_case() {
        let column = DatasourceColumn::new("users", "birthDate", DataType::Date);
        assert_eq!(
            serde_json::to_value(&column).unwrap(),
            json!({ "tableName": "users", "name": "birthDate", "dataType": "DATE" })
        );
    }

    #[test]
    fn test_value_serializes_untagged() {
        let date = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
        assert_eq!(serde_json::to_value(Value::Date(date)).unwrap(), json!("1990-05-17"));
        assert_eq!(serde_json::to_value(Value::Integer(7)).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(Value::ListOfStrings(vec!["a".into()])).unwrap(),
            json!(["a"])
        );
        assert_eq!(Value::from(2.5).data_type(), DataType::Double);
    }

    #[test]
    fn test_column_data_stays_aligned() {
        let mut data = ColumnData::new(
            DatasourceColumn::new("users", "intId", DataType::Integer),
            DatasourceColumn::new("users", "username", DataType::String),
        );
        assert!(data.is_empty());

        data.push(Value::from(1), Value::from("alice"));
        data.push(Value::from(2), Value::from("bob"));

        assert_eq!(data.len(), 2);
        assert_eq!(data.keys().len(), data.values().len());

        let body = serde_json::to_value(&data).unwrap();
        assert_eq!(body["keyColumn"]["name"], "intId");
        assert_eq!(body["dataColumn"]["dataType"], "STRING");
        assert_eq!(body["keys"], json!([1, 2]));
        assert_eq!(body["values"], json!(["alice", "bob"]));
    }
}
