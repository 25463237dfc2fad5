use crate::prelude::*;

///
/// GenericParam
///
/// A generic type parameter with its constraint clause items, kept verbatim
/// (`class`, `new()`, `global::System.IComparable<T>`, ...).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GenericParam {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

impl GenericParam {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    #[must_use]
    pub fn is_constrained(&self) -> bool {
        !self.constraints.is_empty()
    }
}
