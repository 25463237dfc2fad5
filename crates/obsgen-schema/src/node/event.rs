use crate::prelude::*;

///
/// Parameter
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    pub ty: TypeRef,

    #[serde(default)]
    pub ref_kind: RefKind,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            ref_kind: RefKind::None,
        }
    }

    #[must_use]
    pub const fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }
}

///
/// CallbackSignature
///
/// Parameter list (and return type) of an event's handler delegate.
/// Two signatures with the same parameter types are interchangeable.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CallbackSignature {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypeRef>,
}

impl CallbackSignature {
    #[must_use]
    pub const fn new(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            returns: None,
        }
    }

    #[must_use]
    pub const fn is_void(&self) -> bool {
        self.returns.is_none()
    }

    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.ty == b.ty)
    }

    #[must_use]
    pub fn substitute(&self, map: &Substitution) -> Self {
        Self {
            parameters: self
                .parameters
                .iter()
                .map(|p| Parameter {
                    name: p.name.clone(),
                    ty: p.ty.substitute(map),
                    ref_kind: p.ref_kind,
                })
                .collect(),
            returns: self.returns.as_ref().map(|r| r.substitute(map)),
        }
    }
}

///
/// EventMember
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventMember {
    pub name: String,

    #[serde(default)]
    pub accessibility: Accessibility,

    #[serde(default)]
    pub is_static: bool,

    /// Host marked the member as hidden from consumers.
    #[serde(default)]
    pub hidden: bool,

    /// Handler delegate type, e.g. `System.EventHandler`.
    pub delegate: TypeRef,

    #[serde(default)]
    pub signature: CallbackSignature,

    /// Set when the owning descriptor enters a [`crate::universe::TypeUniverse`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<TypeId>,
}

impl EventMember {
    #[must_use]
    pub fn new(name: impl Into<String>, delegate: TypeRef, signature: CallbackSignature) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Public,
            is_static: false,
            hidden: false,
            delegate,
            signature,
            declaring_type: None,
        }
    }

    #[must_use]
    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub const fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub const fn with_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether generated code may see this member at all.
    #[must_use]
    pub const fn is_exposed(&self) -> bool {
        self.accessibility.is_visible() && !self.hidden
    }

    /// Rewrite delegate and signature in terms of a derived type's arguments.
    #[must_use]
    pub fn substitute(&self, map: &Substitution) -> Self {
        Self {
            name: self.name.clone(),
            accessibility: self.accessibility,
            is_static: self.is_static,
            hidden: self.hidden,
            delegate: self.delegate.substitute(map),
            signature: self.signature.substitute(map),
            declaring_type: self.declaring_type.clone(),
        }
    }
}
