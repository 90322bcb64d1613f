use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn full(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// One employee profile as returned by the provider.
///
/// Records are immutable once loaded and are identified by `email`, which
/// the provider guarantees to be unique within a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    pub name: PersonName,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub picture_url: String,
    pub address: Address,
}

impl EmployeeRecord {
    pub fn key(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
pub(crate) fn sample_record(first: &str, last: &str) -> EmployeeRecord {
    EmployeeRecord {
        name: PersonName {
            first: first.to_string(),
            last: last.to_string(),
        },
        email: format!(
            "{}.{}@example.com",
            first.to_lowercase(),
            last.to_lowercase()
        ),
        phone: "(555) 010-0000".to_string(),
        birth_date: "1990-07-15T00:00:00Z".to_string(),
        picture_url: format!("https://randomuser.me/api/portraits/{first}.jpg"),
        address: Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "Oregon".to_string(),
            postal_code: "97477".to_string(),
        },
    }
}
