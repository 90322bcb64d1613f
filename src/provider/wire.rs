use std::fmt;

use serde::Deserialize;

use crate::model::{Address, EmployeeRecord, PersonName};

#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    pub results: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub name: Name,
    pub email: String,
    pub location: Location,
    pub picture: Picture,
    pub phone: String,
    pub dob: Dob,
}

#[derive(Debug, Deserialize)]
pub struct Name {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub street: Street,
    pub city: String,
    pub state: String,
    pub postcode: Postcode,
}

// older API versions send a flat string, current ones split number/name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Street {
    Line(String),
    Parts { number: i64, name: String },
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Line(line) => write!(f, "{line}"),
            Street::Parts { number, name } => write!(f, "{number} {name}"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Postcode {
    Text(String),
    Number(i64),
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Postcode::Text(text) => write!(f, "{text}"),
            Postcode::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Picture {
    pub large: String,
}

#[derive(Debug, Deserialize)]
pub struct Dob {
    pub date: String,
}

impl From<User> for EmployeeRecord {
    fn from(user: User) -> Self {
        EmployeeRecord {
            name: PersonName {
                first: user.name.first,
                last: user.name.last,
            },
            email: user.email,
            phone: user.phone,
            birth_date: user.dob.date,
            picture_url: user.picture.large,
            address: Address {
                street: user.location.street.to_string(),
                city: user.location.city,
                state: user.location.state,
                postal_code: user.location.postcode.to_string(),
            },
        }
    }
}

impl UsersResponse {
    pub fn into_records(self) -> Vec<EmployeeRecord> {
        self.results.into_iter().map(EmployeeRecord::from).collect()
    }
}
