use crate::model::EmployeeRecord;

/// In-memory record collection, kept in provider order.
///
/// The whole collection is swapped on `load`; records are never edited in
/// place.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<EmployeeRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, records: Vec<EmployeeRecord>) {
        self.records = records;
    }

    // linear scan, batches are bounded by the fetch page size
    pub fn find(&self, email: &str) -> Option<&EmployeeRecord> {
        self.records.iter().find(|r| r.email == email)
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
