//! Composite state keys.

use std::fmt;

/// Separator between key components in the canonical form.
pub const KEY_SEPARATOR: char = '/';

/// An ordered, non-empty list of key components such as
/// `("program", "1,2")`.
///
/// The store only ever sees the canonical string: the stringified
/// components joined with [`KEY_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey {
    components: Vec<String>,
}

impl StateKey {
    /// A one-component key.
    pub fn new(first: impl fmt::Display) -> Self {
        Self {
            components: vec![first.to_string()],
        }
    }

    /// Appends a component.
    #[must_use]
    pub fn with(mut self, component: impl fmt::Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The string the backend stores this key under.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                out.push(KEY_SEPARATOR);
            }
            out.push_str(component);
        }
        out
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
