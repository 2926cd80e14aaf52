//! Variable-name dictionary.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Bidirectional map between variable names and 1-based indices.
///
/// Padding variables added by the solve controller are stored alongside
/// user variables but are excluded from [`VariableMap::user_names`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariableMap {
    names: Vec<String>,
    #[serde(skip)]
    indices: FxHashMap<String, u32>,
    padding: usize,
}

impl VariableMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `name`, registering it if unseen.
    pub fn get_or_insert(&mut self, name: &str) -> u32 {
        if let Some(&index) = self.indices.get(name) {
            return index;
        }
        self.names.push(name.to_string());
        let index = self.names.len() as u32;
        self.indices.insert(name.to_string(), index);
        index
    }

    /// Name of the variable with 1-based `index`.
    pub fn name(&self, index: u32) -> Option<&str> {
        let slot = (index as usize).checked_sub(1)?;
        self.names.get(slot).map(String::as_str)
    }

    /// Index of the variable called `name`.
    pub fn index(&self, name: &str) -> Option<u32> {
        self.indices.get(name).copied()
    }

    /// Number of variables, padding included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no variables are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of padding variables.
    pub fn num_padding(&self) -> usize {
        self.padding
    }

    /// Whether `index` refers to a padding variable.
    pub fn is_padding(&self, index: u32) -> bool {
        let user = self.names.len() - self.padding;
        index as usize > user && index as usize <= self.names.len()
    }

    /// Append a padding variable and return its index.
    pub fn push_padding(&mut self) -> u32 {
        let mut k = self.padding;
        let mut name = format!("_pad{k}");
        while self.indices.contains_key(&name) {
            k += 1;
            name = format!("_pad{k}");
        }
        self.padding += 1;
        self.get_or_insert(&name)
    }

    /// Names of user variables in index order.
    pub fn user_names(&self) -> impl Iterator<Item = (u32, &str)> {
        let user = self.names.len() - self.padding;
        self.names[..user]
            .iter()
            .enumerate()
            .map(|(i, n)| (i as u32 + 1, n.as_str()))
    }
}
