use crate::prelude::*;
use derive_more::{Deref, Display};
use std::{collections::BTreeMap, fmt};

/// Maps generic parameter names to the type arguments that replace them.
pub type Substitution = BTreeMap<String, TypeRef>;

///
/// TypeId
///
/// Metadata name of a type definition, e.g. ``Ns.Outer`1+Inner`2``.
/// Unique per definition within one host compilation.
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_parts<'a>(
        namespace: Option<&str>,
        levels: impl IntoIterator<Item = (&'a str, usize)>,
    ) -> Self {
        let mut id = String::new();
        if let Some(namespace) = namespace {
            id.push_str(namespace);
            id.push('.');
        }

        for (i, (name, arity)) in levels.into_iter().enumerate() {
            if i > 0 {
                id.push('+');
            }
            id.push_str(name);
            if arity > 0 {
                id.push('`');
                id.push_str(&arity.to_string());
            }
        }

        Self(id)
    }
}

impl From<&str> for TypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

///
/// TypeSegment
/// One level of a (possibly nested) named type reference.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeSegment {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeRef>,
}

impl TypeSegment {
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

///
/// TypeRef
///
/// A reference to a type as it appears in a member signature.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Named {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
        segments: Vec<TypeSegment>,
    },
    Param {
        name: String,
    },
    Array {
        element: Box<Self>,
        #[serde(default = "default_rank")]
        rank: u8,
    },
    Pointer {
        element: Box<Self>,
    },
    FunctionPointer {
        display: String,
    },
    Unspeakable {
        display: String,
    },
}

const fn default_rank() -> u8 {
    1
}

impl TypeRef {
    #[must_use]
    pub fn named(namespace: &str, name: &str) -> Self {
        Self::generic(namespace, name, Vec::new())
    }

    #[must_use]
    pub fn generic(namespace: &str, name: &str, args: Vec<Self>) -> Self {
        Self::Named {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            segments: vec![TypeSegment::new(name, args)],
        }
    }

    #[must_use]
    pub fn param(name: &str) -> Self {
        Self::Param {
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    #[must_use]
    pub fn unspeakable(display: &str) -> Self {
        Self::Unspeakable {
            display: display.to_string(),
        }
    }

    /// Definition identity of a named reference; `None` for every other kind.
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            Self::Named {
                namespace,
                segments,
            } => Some(TypeId::from_parts(
                namespace.as_deref(),
                segments.iter().map(|s| (s.name.as_str(), s.args.len())),
            )),
            _ => None,
        }
    }

    /// All type arguments of a named reference, outermost segment first.
    #[must_use]
    pub fn type_args(&self) -> Vec<&Self> {
        match self {
            Self::Named { segments, .. } => segments.iter().flat_map(|s| &s.args).collect(),
            _ => Vec::new(),
        }
    }

    /// Replace generic parameters found in `map`; unknown parameters are kept.
    #[must_use]
    pub fn substitute(&self, map: &Substitution) -> Self {
        if map.is_empty() {
            return self.clone();
        }

        match self {
            Self::Param { name } => map.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::Named {
                namespace,
                segments,
            } => Self::Named {
                namespace: namespace.clone(),
                segments: segments
                    .iter()
                    .map(|s| TypeSegment {
                        name: s.name.clone(),
                        args: s.args.iter().map(|a| a.substitute(map)).collect(),
                    })
                    .collect(),
            },
            Self::Array { element, rank } => Self::Array {
                element: Box::new(element.substitute(map)),
                rank: *rank,
            },
            Self::Pointer { element } => Self::Pointer {
                element: Box::new(element.substitute(map)),
            },
            Self::FunctionPointer { .. } | Self::Unspeakable { .. } => self.clone(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named {
                namespace,
                segments,
            } => {
                if let Some(namespace) = namespace {
                    write!(f, "{namespace}.")?;
                }
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&segment.name)?;
                    if !segment.args.is_empty() {
                        let args: Vec<String> = segment.args.iter().map(ToString::to_string).collect();
                        write!(f, "<{}>", args.join(", "))?;
                    }
                }
                Ok(())
            }
            Self::Param { name } => f.write_str(name),
            Self::Array { element, rank } => {
                let commas = ",".repeat(usize::from(rank.saturating_sub(1)));
                write!(f, "{element}[{commas}]")
            }
            Self::Pointer { element } => write!(f, "{element}*"),
            Self::FunctionPointer { display } | Self::Unspeakable { display } => {
                f.write_str(display)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_id_uses_metadata_arity_per_segment() {
        let reference = TypeRef::Named {
            namespace: Some("Ns".to_string()),
            segments: vec![
                TypeSegment::new("Outer", vec![TypeRef::param("T")]),
                TypeSegment::new("Inner", vec![]),
            ],
        };

        assert_eq!(reference.type_id(), Some(TypeId::new("Ns.Outer`1+Inner")));
        assert_eq!(TypeRef::param("T").type_id(), None);
    }

    #[test]
    fn substitute_replaces_nested_params() {
        let list_of_t = TypeRef::generic(
            "System.Collections.Generic",
            "List",
            vec![TypeRef::array(TypeRef::param("T"))],
        );
        let map = Substitution::from([("T".to_string(), TypeRef::named("System", "Int32"))]);

        assert_eq!(
            list_of_t.substitute(&map).to_string(),
            "System.Collections.Generic.List<System.Int32[]>"
        );
    }

    #[test]
    fn substitute_keeps_unmapped_params() {
        let map = Substitution::from([("T".to_string(), TypeRef::named("System", "Int32"))]);

        assert_eq!(TypeRef::param("U").substitute(&map), TypeRef::param("U"));
    }

    #[test]
    fn deserializes_tagged_json() {
        let json = r#"{"kind":"array","element":{"kind":"param","name":"T"},"rank":2}"#;
        let reference: TypeRef = serde_json::from_str(json).expect("type ref should parse");

        assert_eq!(reference.to_string(), "T[,]");
    }
}
