use crate::prelude::*;

///
/// EnclosingType
/// One containing type of a nested type, outermost first in the chain.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnclosingType {
    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default)]
    pub accessibility: Accessibility,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_params: Vec<GenericParam>,
}

impl EnclosingType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            accessibility: Accessibility::Public,
            generic_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_generic(mut self, param: GenericParam) -> Self {
        self.generic_params.push(param);
        self
    }

    #[must_use]
    pub const fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }
}

///
/// TypeDescriptor
///
/// Immutable snapshot of a type definition exported by the host.
/// Identity is [`TypeDescriptor::id`].
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default)]
    pub accessibility: Accessibility,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enclosing: Vec<EnclosingType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_params: Vec<GenericParam>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventMember>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(namespace: &str, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.into(),
            kind,
            accessibility: Accessibility::Public,
            enclosing: Vec::new(),
            generic_params: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(namespace: &str, name: impl Into<String>) -> Self {
        Self::new(namespace, name, TypeKind::Class)
    }

    #[must_use]
    pub fn interface(namespace: &str, name: impl Into<String>) -> Self {
        Self::new(namespace, name, TypeKind::Interface)
    }

    #[must_use]
    pub const fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn with_enclosing(mut self, enclosing: EnclosingType) -> Self {
        self.enclosing.push(enclosing);
        self
    }

    #[must_use]
    pub fn with_generic(mut self, param: GenericParam) -> Self {
        self.generic_params.push(param);
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base_type = Some(base);
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: EventMember) -> Self {
        self.events.push(event);
        self
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        TypeId::from_parts(
            self.namespace.as_deref(),
            self.enclosing
                .iter()
                .map(|e| (e.name.as_str(), e.generic_params.len()))
                .chain(std::iter::once((
                    self.name.as_str(),
                    self.generic_params.len(),
                ))),
        )
    }

    /// Human-readable, file-system safe identity: `Ns.Outer{T}+Inner{U}`.
    #[must_use]
    pub fn display_name(&self) -> String {
        fn level(name: &str, params: &[GenericParam]) -> String {
            if params.is_empty() {
                return name.to_string();
            }
            let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            format!("{name}{{{}}}", names.join(","))
        }

        let levels: Vec<String> = self
            .enclosing
            .iter()
            .map(|e| level(&e.name, &e.generic_params))
            .chain(std::iter::once(level(&self.name, &self.generic_params)))
            .collect();

        match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", levels.join("+")),
            None => levels.join("+"),
        }
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }

    /// The type and every enclosing type are reachable from generated code.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.accessibility.is_visible()
            && self.enclosing.iter().all(|e| e.accessibility.is_visible())
    }

    /// Every generic parameter in scope inside the type, enclosing levels first.
    pub fn scope_params(&self) -> impl Iterator<Item = &GenericParam> {
        self.enclosing
            .iter()
            .flat_map(|e| &e.generic_params)
            .chain(&self.generic_params)
    }

    /// Reference to this definition with its own parameters as arguments.
    #[must_use]
    pub fn self_reference(&self) -> TypeRef {
        fn args(params: &[GenericParam]) -> Vec<TypeRef> {
            params.iter().map(|p| TypeRef::param(&p.name)).collect()
        }

        let segments = self
            .enclosing
            .iter()
            .map(|e| TypeSegment::new(e.name.clone(), args(&e.generic_params)))
            .chain(std::iter::once(TypeSegment::new(
                self.name.clone(),
                args(&self.generic_params),
            )))
            .collect();

        TypeRef::Named {
            namespace: self.namespace.clone(),
            segments,
        }
    }

    /// Map this definition's scope parameters onto the arguments of
    /// `reference`. `None` when the argument count does not line up.
    #[must_use]
    pub fn substitution_for(&self, reference: &TypeRef) -> Option<Substitution> {
        let args = reference.type_args();
        let params: Vec<&GenericParam> = self.scope_params().collect();

        if args.len() != params.len() {
            return None;
        }

        Some(
            params
                .into_iter()
                .zip(args)
                .map(|(p, a)| (p.name.clone(), a.clone()))
                .collect(),
        )
    }
}
