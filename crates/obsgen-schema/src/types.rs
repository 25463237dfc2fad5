use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// Accessibility
///
/// Declared accessibility as seen from the consuming compilation.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Internal,
    Private,
    PrivateProtected,
    Protected,
    ProtectedInternal,
    #[default]
    Public,
}

impl Accessibility {
    /// Generated wrappers live outside the type hierarchy, so only members
    /// reachable without inheritance are visible to them.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Public | Self::Internal | Self::ProtectedInternal)
    }
}

///
/// TypeKind
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
}

impl TypeKind {
    #[must_use]
    pub const fn is_interface(self) -> bool {
        matches!(self, Self::Interface)
    }
}

///
/// RefKind
/// How a callback parameter is passed.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    #[default]
    None,
    In,
    Out,
    Ref,
}

///
/// Flavor
/// Which event members a batch wraps.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    Instance,
    Static,
}

impl Flavor {
    #[must_use]
    pub const fn is_static(self) -> bool {
        matches!(self, Self::Static)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_excludes_inheritance_only_access() {
        assert!(Accessibility::Public.is_visible());
        assert!(Accessibility::ProtectedInternal.is_visible());
        assert!(!Accessibility::Protected.is_visible());
        assert!(!Accessibility::PrivateProtected.is_visible());
        assert!(!Accessibility::Private.is_visible());
    }

    #[test]
    fn flavor_display_is_file_tag() {
        assert_eq!(Flavor::Instance.to_string(), "Instance");
        assert_eq!(Flavor::Static.to_string(), "Static");
        assert_eq!("Static".parse::<Flavor>().ok(), Some(Flavor::Static));
    }
}
