use serde::{Deserialize, Serialize};

/// One tracked fridge entry. All fields are free-form strings: quantity is
/// not parsed as a number and expiry is not parsed as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: String,
    pub expiry: String,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            expiry: expiry.into(),
        }
    }

    /// One-line inventory listing for this item.
    pub fn summary(&self) -> String {
        format!("{} - {} - expiry: {}", self.name, self.quantity, self.expiry)
    }
}

/// The full ordered collection of tracked items.
///
/// Insertion order is preserved and duplicate names are allowed; removal by
/// name takes out every exact match. Serializes transparently as a JSON array
/// of items, which is also the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fridge {
    items: Vec<Item>,
}

impl Fridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove every item whose name is an exact, case-sensitive match.
    /// Returns how many were removed; relative order of the rest is kept.
    pub fn remove_all(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        before - self.items.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl From<Vec<Item>> for Fridge {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}
