//! Field Extractor Table
//!
//! Binds every (table, column) pair to a typed accessor over the matching
//! record type. Lookups are structural on [`ColumnRef`].

use std::collections::HashMap;

use dvt_core::{ColumnRef, DatasourceColumn, DvtError, Result, Value};
use tracing::debug;

use super::registry::{SchemaRegistry, COMPANIES_TABLE, DEPARTMENTS_TABLE, USERS_TABLE};
use crate::records::{Company, Department, Record, User};

type UserField = fn(&User) -> Value;
type CompanyField = fn(&Company) -> Value;
type DepartmentField = fn(&Department) -> Value;

const USER_FIELDS: &[(&str, UserField)] = &[
    ("intId", |u: &User| Value::Integer(u.int_id)),
    ("longId", |u: &User| Value::Long(u.long_id)),
    ("username", |u: &User| Value::String(u.username.clone())),
    ("password", |u: &User| Value::String(u.password.clone())),
    ("birthDate", |u: &User| Value::Date(u.birth_date)),
    ("groupName", |u: &User| Value::String(u.group_name.clone())),
];

const COMPANY_FIELDS: &[(&str, CompanyField)] = &[
    ("intId", |c: &Company| Value::Integer(c.int_id)),
    ("longId", |c: &Company| Value::Long(c.long_id)),
    ("active", |c: &Company| Value::Boolean(c.active)),
    ("companyName", |c: &Company| Value::String(c.company_name.clone())),
    ("lastRevenue", |c: &Company| Value::Double(c.last_revenue)),
    ("country", |c: &Company| Value::String(c.country.clone())),
    ("dateOfCreation", |c: &Company| Value::DateTime(c.date_of_creation)),
    ("foundersFirstNames", |c: &Company| Value::String(c.founders_first_names.clone())),
    ("foundersLastNames", |c: &Company| Value::String(c.founders_last_names.clone())),
    ("categories", |c: &Company| Value::ListOfIntegers(c.categories.clone())),
    ("competitors", |c: &Company| Value::ListOfStrings(c.competitors.clone())),
];

const DEPARTMENT_FIELDS: &[(&str, DepartmentField)] = &[
    ("intId", |d: &Department| Value::Integer(d.int_id)),
    ("longId", |d: &Department| Value::Long(d.long_id)),
    ("name", |d: &Department| Value::String(d.name.clone())),
    ("numberOfEmployees", |d: &Department| Value::Integer(d.number_of_employees)),
    ("employees", |d: &Department| {
        Value::ListOfObjects(d.employees.iter().map(User::to_json).collect())
    }),
];

/// Accessor for one column, tagged by the record type it reads
#[derive(Clone, Copy)]
pub enum Extractor {
    User(UserField),
    Company(CompanyField),
    Department(DepartmentField),
}

impl Extractor {
    /// Table whose records this extractor reads
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::User(_) => USERS_TABLE,
            Self::Company(_) => COMPANIES_TABLE,
            Self::Department(_) => DEPARTMENTS_TABLE,
        }
    }

    /// Read the bound field off `record`.
    ///
    /// A record of a different table means the data services and the
    /// extractor table are wired inconsistently.
    pub fn extract(&self, record: &Record) -> Result<Value> {
        match (self, record) {
            (Self::User(f), Record::User(user)) => Ok(f(user)),
            (Self::Company(f), Record::Company(company)) => Ok(f(company)),
            (Self::Department(f), Record::Department(department)) => Ok(f(department)),
            _ => Err(DvtError::configuration(format!(
                "Extractor for table {} applied to a {} record",
                self.table_name(),
                record.table_name()
            ))),
        }
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Extractor({})", self.table_name())
    }
}

#[derive(Debug, Default)]
pub struct ExtractorTable {
    extractors: HashMap<ColumnRef, Extractor>,
}

impl ExtractorTable {
    /// Table with accessors for every column of the static catalog
    pub fn new() -> Self {
        let mut table = Self::default();
        for (column, f) in USER_FIELDS {
            table.register(ColumnRef::new(USERS_TABLE, column), Extractor::User(*f));
        }
        for (column, f) in COMPANY_FIELDS {
            table.register(ColumnRef::new(COMPANIES_TABLE, column), Extractor::Company(*f));
        }
        for (column, f) in DEPARTMENT_FIELDS {
            table.register(ColumnRef::new(DEPARTMENTS_TABLE, column), Extractor::Department(*f));
        }
        table
    }

    pub fn register(&mut self, column: ColumnRef, extractor: Extractor) {
        self.extractors.insert(column, extractor);
    }

    pub fn get_extractor(&self, column: &DatasourceColumn) -> Result<&Extractor> {
        self.extractors.get(&column.column_ref()).ok_or_else(|| {
            DvtError::configuration(format!("No extractor registered for column {}", column))
        })
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Startup self-check against the registry.
    ///
    /// Every catalog column needs an extractor bound to its table's record
    /// type. For tables with a sample record, each extractor is applied and
    /// the value must carry the column's declared data type.
    pub fn validate(&self, registry: &SchemaRegistry, samples: &[Record]) -> Result<()> {
        for table in registry.tables() {
            let sample = samples.iter().find(|r| r.table_name() == table.name);

            for column in registry.columns_of(table) {
                let extractor = self.get_extractor(column)?;
                if extractor.table_name() != table.name {
                    return Err(DvtError::configuration(format!(
                        "Column {} is bound to an extractor for table {}",
                        column,
                        extractor.table_name()
                    )));
                }

                if let Some(record) = sample {
                    let actual = extractor.extract(record)?.data_type();
                    if actual != column.data_type {
                        return Err(DvtError::configuration(format!(
                            "Column {} declares {} but its extractor returns {}",
                            column, column.data_type, actual
                        )));
                    }
                }
            }

            debug!(
                table = %table.name,
                sampled = sample.is_some(),
                "Extractors validated"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dvt_core::DataType;

    fn user() -> User {
        User {
            int_id: 1,
            long_id: 10_000_000_001,
            username: "alice".to_string(),
            password: "secret".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 2).unwrap(),
            group_name: "admins".to_string(),
        }
    }

    fn company() -> Company {
        Company {
            int_id: 3,
            long_id: 30,
            active: true,
            company_name: "Acme".to_string(),
            last_revenue: 1250.5,
            country: "Norway".to_string(),
            date_of_creation: NaiveDate::from_ymd_opt(2001, 3, 4)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            founders_first_names: "Ada, Alan".to_string(),
            founders_last_names: "Lovelace, Turing".to_string(),
            categories: vec![1, 7],
            competitors: vec!["Globex".to_string()],
        }
    }

    fn department() -> Department {
        Department {
            int_id: 5,
            long_id: 50,
            name: "Research".to_string(),
            number_of_employees: 1,
            employees: vec![user()],
        }
    }

    fn samples() -> Vec<Record> {
        vec![user().into(), company().into(), department().into()]
    }

    #[test]
    fn test_every_catalog_column_has_extractor() {
        let registry = SchemaRegistry::new().unwrap();
        let extractors = ExtractorTable::new();

        assert_eq!(extractors.len(), registry.metadata().columns.len());
        for table in registry.tables() {
            for column in registry.columns_of(table) {
                assert!(extractors.get_extractor(column).is_ok(), "missing {}", column);
                assert_eq!(registry.get_column(table, &column.name), Some(column));
            }
        }
    }

    #[test]
    fn test_validate_accepts_catalog() {
        let registry = SchemaRegistry::new().unwrap();
        ExtractorTable::new().validate(&registry, &samples()).unwrap();
        ExtractorTable::new().validate(&registry, &[]).unwrap();
    }

    #[test]
    fn test_validate_detects_missing_extractor() {
        let registry = SchemaRegistry::new().unwrap();
        let mut extractors = ExtractorTable::default();
        for (column, f) in USER_FIELDS {
            extractors.register(ColumnRef::new(USERS_TABLE, column), Extractor::User(*f));
        }

        let err = extractors.validate(&registry, &samples()).unwrap_err();
        assert!(matches!(err, DvtError::Configuration(_)));
    }

    #[test]
    fn test_validate_detects_type_drift() {
        let registry = SchemaRegistry::new().unwrap();
        let mut extractors = ExtractorTable::new();
        extractors.register(
            ColumnRef::new(USERS_TABLE, "birthDate"),
            Extractor::User(|u: &User| Value::String(u.birth_date.to_string())),
        );

        let err = extractors.validate(&registry, &samples()).unwrap_err();
        assert!(err.to_string().contains("birthDate"));
    }

    #[test]
    fn test_validate_detects_wrong_record_type() {
        let registry = SchemaRegistry::new().unwrap();
        let mut extractors = ExtractorTable::new();
        extractors.register(
            ColumnRef::new(USERS_TABLE, "intId"),
            Extractor::Company(|c: &Company| Value::Integer(c.int_id)),
        );

        assert!(extractors.validate(&registry, &[]).is_err());
    }

    #[test]
    fn test_extract_values() {
        let registry = SchemaRegistry::new().unwrap();
        let extractors = ExtractorTable::new();
        let companies = registry.get_table("companies").unwrap();

        let categories = registry.get_column(companies, "categories").unwrap();
        let value = extractors
            .get_extractor(categories)
            .unwrap()
            .extract(&company().into())
            .unwrap();
        assert_eq!(value, Value::ListOfIntegers(vec![1, 7]));

        let departments = registry.get_table("departments").unwrap();
        let employees = registry.get_column(departments, "employees").unwrap();
        let value = extractors
            .get_extractor(employees)
            .unwrap()
            .extract(&department().into())
            .unwrap();
        match value {
            Value::ListOfObjects(objects) => {
                assert_eq!(objects.len(), 1);
                assert_eq!(objects[0]["username"], "alice");
                assert_eq!(objects[0]["birthDate"], "1990-01-02");
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_extract_rejects_foreign_record() {
        let extractor = Extractor::User(|u: &User| Value::Integer(u.int_id));
        let err = extractor.extract(&company().into()).unwrap_err();
        assert!(matches!(err, DvtError::Configuration(_)));
        assert_eq!(Value::Integer(1).data_type(), DataType::Integer);
    }
}
