//! Deterministic sample data for the example tables

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::records::{Company, Department, User};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy",
    "Mallory", "Niaj", "Olivia", "Peggy", "Rupert", "Sybil", "Trent", "Victor", "Walter",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Clark", "Davis", "Evans", "Fischer", "Garcia", "Hughes", "Ivanov",
    "Jensen", "Kowalski", "Lopez", "Martin", "Nielsen", "Olsen", "Petrov",
];

const GROUPS: &[&str] = &["admins", "developers", "analysts", "support", "guests"];

const COMPANY_PREFIXES: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark", "Wayne", "Tyrell", "Cyberdyne",
    "Soylent", "Vandelay", "Wonka",
];

const COMPANY_SUFFIXES: &[&str] = &["Industries", "Labs", "Systems", "Holdings", "Group", "Partners"];

const COUNTRIES: &[&str] = &[
    "Norway", "Germany", "Brazil", "Japan", "Canada", "Kenya", "India", "Australia", "Chile",
];

const DEPARTMENT_NAMES: &[&str] = &[
    "Engineering", "Sales", "Marketing", "Finance", "Legal", "Operations", "Research",
    "Support", "Human Resources",
];

const PASSWORD_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const LONG_ID_BASE: i64 = 10_000_000_000;

/// Records for all three tables, generated together so departments can
/// embed existing users.
#[derive(Debug, Clone)]
pub struct GeneratedData {
    pub users: Vec<User>,
    pub companies: Vec<Company>,
    pub departments: Vec<Department>,
}

/// Seeded generator; the same seed always yields the same data
pub struct SampleDataGenerator {
    rng: StdRng,
}

impl SampleDataGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(mut self, users: usize, companies: usize, departments: usize) -> GeneratedData {
        let users = self.users(users);
        let companies = self.companies(companies);
        let departments = self.departments(departments, &users);
        GeneratedData {
            users,
            companies,
            departments,
        }
    }

    fn users(&mut self, count: usize) -> Vec<User> {
        (0..count)
            .map(|i| {
                let first = self.pick(FIRST_NAMES);
                let last = self.pick(LAST_NAMES);
                let password: String = (0..12)
                    .map(|_| PASSWORD_CHARSET[self.rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
                    .collect();

                User {
                    int_id: id(i),
                    long_id: LONG_ID_BASE + i as i64,
                    username: format!("{}.{}{}", first, last, i).to_lowercase(),
                    password,
                    birth_date: self.date(1950, 25_000),
                    group_name: self.pick(GROUPS).to_string(),
                }
            })
            .collect()
    }

    fn companies(&mut self, count: usize) -> Vec<Company> {
        let names: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    "{} {} {}",
                    self.pick(COMPANY_PREFIXES),
                    self.pick(COMPANY_SUFFIXES),
                    i + 1
                )
            })
            .collect();

        (0..count)
            .map(|i| {
                let founders = self.rng.gen_range(1..=3);
                let first_names: Vec<&str> = (0..founders).map(|_| self.pick(FIRST_NAMES)).collect();
                let last_names: Vec<&str> = (0..founders).map(|_| self.pick(LAST_NAMES)).collect();

                let category_count = self.rng.gen_range(0..=4);
                let categories = (0..category_count).map(|_| self.rng.gen_range(1..=20)).collect();

                let competitor_count = self.rng.gen_range(0..=3).min(count.saturating_sub(1));
                let competitors = names
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, name)| name.clone())
                    .collect::<Vec<_>>()
                    .choose_multiple(&mut self.rng, competitor_count)
                    .cloned()
                    .collect();

                let created = self.date(1900, 45_000);
                let seconds = self.rng.gen_range(0..86_400);

                Company {
                    int_id: id(i),
                    long_id: LONG_ID_BASE + i as i64,
                    active: self.rng.gen_bool(0.8),
                    company_name: names[i].clone(),
                    last_revenue: (self.rng.gen_range(10_000.0..50_000_000.0_f64) * 100.0).round() / 100.0,
                    country: self.pick(COUNTRIES).to_string(),
                    date_of_creation: at_second(created, seconds),
                    founders_first_names: first_names.join(", "),
                    founders_last_names: last_names.join(", "),
                    categories,
                    competitors,
                }
            })
            .collect()
    }

    fn departments(&mut self, count: usize, users: &[User]) -> Vec<Department> {
        (0..count)
            .map(|i| {
                let base = DEPARTMENT_NAMES[i % DEPARTMENT_NAMES.len()];
                let name = match i / DEPARTMENT_NAMES.len() {
                    0 => base.to_string(),
                    round => format!("{} {}", base, round + 1),
                };

                let size = self.rng.gen_range(0..=5).min(users.len());
                let employees: Vec<User> = users.choose_multiple(&mut self.rng, size).cloned().collect();

                Department {
                    int_id: id(i),
                    long_id: LONG_ID_BASE + i as i64,
                    name,
                    number_of_employees: employees.len() as i32,
                    employees,
                }
            })
            .collect()
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// A date within `span_days` after January 1st of `from_year`
    fn date(&mut self, from_year: i32, span_days: i64) -> NaiveDate {
        let start = NaiveDate::from_ymd_opt(from_year, 1, 1).unwrap_or_default();
        start + Duration::days(self.rng.gen_range(0..span_days))
    }
}

fn id(index: usize) -> i32 {
    index as i32 + 1
}

fn at_second(date: NaiveDate, seconds: i64) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_default() + Duration::seconds(seconds)
}
