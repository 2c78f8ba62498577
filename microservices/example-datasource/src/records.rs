//! Domain records served by the example datasource

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::catalog::{COMPANIES_TABLE, DEPARTMENTS_TABLE, USERS_TABLE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub int_id: i32,
    pub long_id: i64,
    pub username: String,
    pub password: String,
    pub birth_date: NaiveDate,
    pub group_name: String,
}

impl User {
    /// JSON object with the same shape as the serde representation, built
    /// field by field so it cannot fail.
    pub fn to_json(&self) -> Json {
        let mut object = Map::with_capacity(6);
        object.insert("intId".to_string(), self.int_id.into());
        object.insert("longId".to_string(), self.long_id.into());
        object.insert("username".to_string(), self.username.clone().into());
        object.insert("password".to_string(), self.password.clone().into());
        object.insert("birthDate".to_string(), self.birth_date.format("%Y-%m-%d").to_string().into());
        object.insert("groupName".to_string(), self.group_name.clone().into());
        Json::Object(object)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub int_id: i32,
    pub long_id: i64,
    pub active: bool,
    pub company_name: String,
    pub last_revenue: f64,
    pub country: String,
    pub date_of_creation: NaiveDateTime,
    pub founders_first_names: String,
    pub founders_last_names: String,
    pub categories: Vec<i32>,
    pub competitors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub int_id: i32,
    pub long_id: i64,
    pub name: String,
    pub number_of_employees: i32,
    pub employees: Vec<User>,
}

/// One row of any table, tagged by its record type
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    User(User),
    Company(Company),
    Department(Department),
}

impl Record {
    /// Name of the table this record belongs to
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::User(_) => USERS_TABLE,
            Self::Company(_) => COMPANIES_TABLE,
            Self::Department(_) => DEPARTMENTS_TABLE,
        }
    }
}

impl From<User> for Record {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<Company> for Record {
    fn from(company: Company) -> Self {
        Self::Company(company)
    }
}

impl From<Department> for Record {
    fn from(department: Department) -> Self {
        Self::Department(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            int_id: 4,
            long_id: 10_000_000_003,
            username: "dave.davis3".to_string(),
            password: "Zq81mWc0PbTa".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1977, 11, 5).unwrap(),
            group_name: "support".to_string(),
        }
    }

    #[test]
    fn test_user_json_matches_serde_shape() {
        let user = user();
        assert_eq!(user.to_json(), serde_json::to_value(&user).unwrap());
    }

    #[test]
    fn test_user_json_fields() {
        let json = user().to_json();
        assert_eq!(json["intId"], 4);
        assert_eq!(json["longId"], 10_000_000_003_i64);
        assert_eq!(json["birthDate"], "1977-11-05");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_record_table_names() {
        assert_eq!(Record::from(user()).table_name(), "users");
    }
}
