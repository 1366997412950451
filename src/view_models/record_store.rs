/// Canonical in-memory collection behind one list view.
///
/// Contents are only ever replaced wholesale; `revision` counts replacements.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    revision: u64,
}

impl<R> RecordStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            revision: 0,
        }
    }

    pub fn replace(&mut self, records: Vec<R>) {
        self.records = records;
        self.revision += 1;
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
