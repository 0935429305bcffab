//! Resolve foreign ids (e.g. `customerId`) to display labels.

use malha_model::Resource;

/// `(id, label)` pairs from one loaded collection.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    entries: Vec<(String, String)>,
}

impl Lookup {
    pub fn from_items<R: Resource>(items: &[R]) -> Self {
        Self {
            entries: items
                .iter()
                .map(|r| (r.id().to_string(), r.label()))
                .collect(),
        }
    }

    /// Label for `id`, or `fallback` when it is not in the collection.
    ///
    /// Linear scan; dangling ids are expected and not an error.
    pub fn resolve<'a>(&'a self, id: &str, fallback: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, label)| label.as_str())
            .unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
