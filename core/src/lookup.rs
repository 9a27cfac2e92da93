//! Id → record maps used to turn foreign keys into display names.

use std::collections::HashMap;

use crate::resource::Named;
use crate::types::Id;

/// Records of one reference collection keyed by id.
#[derive(Debug, Clone)]
pub struct LookupMap<R> {
    by_id: HashMap<Id, R>,
}

impl<R> Default for LookupMap<R> {
    fn default() -> Self {
        Self { by_id: HashMap::new() }
    }
}

impl<R: Named> LookupMap<R> {
    /// Later duplicates win, matching a plain id-keyed insert.
    pub fn from_records(records: impl IntoIterator<Item = R>) -> Self {
        Self {
            by_id: records.into_iter().map(|r| (r.id(), r)).collect(),
        }
    }

    pub fn get(&self, id: Id) -> Option<&R> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Name of the referenced record; the raw id when it is not in the map;
    /// empty when there is no reference at all.
    pub fn display(&self, id: Option<Id>) -> String {
        match id {
            None => String::new(),
            Some(id) => self
                .get(id)
                .map(|r| r.name().to_string())
                .unwrap_or_else(|| id.to_string()),
        }
    }
}
