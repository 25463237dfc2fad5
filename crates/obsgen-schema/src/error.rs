use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-keyed aggregation of validation messages. Routes are type ids or
/// member names, so rendering is stable across runs.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, message: impl fmt::Display) {
        self.messages.push(message.to_string());
    }

    /// Merge another tree underneath `route`, dropping it when empty.
    pub fn add_for(&mut self, route: impl Into<String>, tree: Self) {
        if tree.is_empty() {
            return;
        }

        self.children.entry(route.into()).or_default().merge(tree);
    }

    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.add_for(route, child);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Number of messages across the whole tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn flatten(&self, prefix: &str, out: &mut Vec<String>) {
        for message in &self.messages {
            if prefix.is_empty() {
                out.push(message.clone());
            } else {
                out.push(format!("{prefix}: {message}"));
            }
        }

        for (route, child) in &self.children {
            let nested = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix} > {route}")
            };
            child.flatten(&nested, out);
        }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        self.flatten("", &mut lines);

        write!(f, "{}", lines.join("; "))
    }
}

/// Push a formatted message onto an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn nested_routes_render_in_order() {
        let mut inner = ErrorTree::new();
        err!(inner, "name `{}` is not an identifier", "1x");

        let mut tree = ErrorTree::new();
        tree.add_for("b.Type", inner.clone());
        tree.add_for("a.Type", inner);
        tree.add("top level");

        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree.to_string(),
            "top level; a.Type: name `1x` is not an identifier; b.Type: name `1x` is not an identifier"
        );
    }

    #[test]
    fn empty_children_are_dropped() {
        let mut tree = ErrorTree::new();
        tree.add_for("nothing", ErrorTree::new());

        assert!(tree.is_empty());
    }
}
