//! Schema Registry
//!
//! Table and column definitions for the three static tables. Built once at
//! startup and never mutated afterwards.

use std::collections::{HashMap, HashSet};

use dvt_core::{ColumnRef, DataType, DatasourceColumn, DatasourceMetadata, DatasourceTable, DvtError, Result};

pub const DEPARTMENTS_TABLE: &str = "departments";
pub const USERS_TABLE: &str = "users";
pub const COMPANIES_TABLE: &str = "companies";

const DEPARTMENTS_COLUMNS: &[(&str, DataType)] = &[
    ("intId", DataType::Integer),
    ("longId", DataType::Long),
    ("name", DataType::String),
    ("numberOfEmployees", DataType::Integer),
    ("employees", DataType::ListOfObjects),
];

const USERS_COLUMNS: &[(&str, DataType)] = &[
    ("intId", DataType::Integer),
    ("longId", DataType::Long),
    ("username", DataType::String),
    ("password", DataType::String),
    ("birthDate", DataType::Date),
    ("groupName", DataType::String),
];

const COMPANIES_COLUMNS: &[(&str, DataType)] = &[
    ("intId", DataType::Integer),
    ("longId", DataType::Long),
    ("active", DataType::Boolean),
    ("companyName", DataType::String),
    ("lastRevenue", DataType::Double),
    ("country", DataType::String),
    ("dateOfCreation", DataType::DateTime),
    ("foundersFirstNames", DataType::String),
    ("foundersLastNames", DataType::String),
    ("categories", DataType::ListOfIntegers),
    ("competitors", DataType::ListOfStrings),
];

/// (table, primary key, typed columns) in catalog order
const CATALOG: &[(&str, &str, &[(&str, DataType)])] = &[
    (DEPARTMENTS_TABLE, "intId", DEPARTMENTS_COLUMNS),
    (USERS_TABLE, "intId", USERS_COLUMNS),
    (COMPANIES_TABLE, "intId", COMPANIES_COLUMNS),
];

/// The static catalog served by this datasource
pub fn static_metadata() -> DatasourceMetadata {
    let mut tables = Vec::with_capacity(CATALOG.len());
    let mut columns = Vec::new();

    for (table, primary_key, typed_columns) in CATALOG {
        let names: Vec<&str> = typed_columns.iter().map(|(name, _)| *name).collect();
        tables.push(DatasourceTable::new(table, primary_key, &names));
        columns.extend(
            typed_columns
                .iter()
                .map(|(name, data_type)| DatasourceColumn::new(table, name, *data_type)),
        );
    }

    DatasourceMetadata { tables, columns }
}

/// Lookup over an immutable table/column catalog
#[derive(Debug)]
pub struct SchemaRegistry {
    metadata: DatasourceMetadata,
    tables: HashMap<String, usize>,
    columns: HashMap<ColumnRef, usize>,
}

impl SchemaRegistry {
    /// Registry over the static catalog
    pub fn new() -> Result<Self> {
        Self::from_metadata(static_metadata())
    }

    /// Build a registry, rejecting catalogs whose table column lists and
    /// column descriptors disagree.
    pub fn from_metadata(metadata: DatasourceMetadata) -> Result<Self> {
        let mut tables = HashMap::with_capacity(metadata.tables.len());
        for (idx, table) in metadata.tables.iter().enumerate() {
            if tables.insert(table.name.clone(), idx).is_some() {
                return Err(DvtError::configuration(format!("Duplicate table: {}", table.name)));
            }
            if !table.has_column(&table.primary_key) {
                return Err(DvtError::configuration(format!(
                    "Primary key {} is not a column of table {}",
                    table.primary_key, table.name
                )));
            }
        }

        let mut columns = HashMap::with_capacity(metadata.columns.len());
        for (idx, column) in metadata.columns.iter().enumerate() {
            let listed = tables
                .get(&column.table_name)
                .map(|&t| metadata.tables[t].has_column(&column.name))
                .unwrap_or(false);
            if !listed {
                return Err(DvtError::configuration(format!(
                    "Column {} is not listed by any table",
                    column
                )));
            }
            if columns.insert(column.column_ref(), idx).is_some() {
                return Err(DvtError::configuration(format!("Duplicate column: {}", column)));
            }
        }

        for table in &metadata.tables {
            let mut seen = HashSet::new();
            for name in &table.columns {
                if !seen.insert(name.as_str()) {
                    return Err(DvtError::configuration(format!(
                        "Column {} listed twice for table {}",
                        name, table.name
                    )));
                }
                if !columns.contains_key(&ColumnRef::new(&table.name, name)) {
                    return Err(DvtError::configuration(format!(
                        "Column {} of table {} has no declared data type",
                        name, table.name
                    )));
                }
            }
        }

        Ok(Self {
            metadata,
            tables,
            columns,
        })
    }

    pub fn metadata(&self) -> &DatasourceMetadata {
        &self.metadata
    }

    pub fn get_table(&self, name: &str) -> Option<&DatasourceTable> {
        self.tables.get(name).map(|&idx| &self.metadata.tables[idx])
    }

    pub fn get_column(&self, table: &DatasourceTable, name: &str) -> Option<&DatasourceColumn> {
        self.columns
            .get(&ColumnRef::new(&table.name, name))
            .map(|&idx| &self.metadata.columns[idx])
    }

    pub fn tables(&self) -> impl Iterator<Item = &DatasourceTable> {
        self.metadata.tables.iter()
    }

    /// Columns of `table` in declaration order
    pub fn columns_of<'a>(&'a self, table: &'a DatasourceTable) -> impl Iterator<Item = &'a DatasourceColumn> + 'a {
        table
            .columns
            .iter()
            .filter_map(move |name| self.get_column(table, name))
    }
}
