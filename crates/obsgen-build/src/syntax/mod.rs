//! Minimal C# declaration tree.
//!
//! Emitters build these nodes; [`ToSource`] serializes a finished
//! [`CompilationUnit`] once. Only the shapes the generator needs exist here.

mod print;
mod writer;

pub use writer::{SourceWriter, ToSource};

use derive_more::Display;
use obsgen_schema::{naming::is_reserved_word, node::GenericParam};
use std::fmt;

///
/// Ident
/// An identifier; keywords are written with a leading `@`.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ident(String);

impl Ident {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_reserved_word(&self.0) {
            f.write_str("@")?;
        }

        f.write_str(&self.0)
    }
}

///
/// TypeSyntax
/// A fully spelled type, e.g. `global::System.IObservable<int>`.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct TypeSyntax(String);

impl TypeSyntax {
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// `base<arg, ...>`, or `base` alone when there are no arguments.
    #[must_use]
    pub fn generic(base: &str, args: &[Self]) -> Self {
        if args.is_empty() {
            return Self::raw(base);
        }

        let args: Vec<&str> = args.iter().map(Self::as_str).collect();
        Self(format!("{base}<{}>", args.join(", ")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// Modifier
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Modifier {
    #[display("internal")]
    Internal,
    #[display("partial")]
    Partial,
    #[display("private")]
    Private,
    #[display("public")]
    Public,
    #[display("readonly")]
    Readonly,
    #[display("sealed")]
    Sealed,
    #[display("static")]
    Static,
}

///
/// ParamModifier
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ParamModifier {
    #[display("in")]
    In,
    #[display("ref")]
    Ref,
    #[display("this")]
    This,
}

///
/// GenericParamSyntax
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenericParamSyntax {
    pub name: Ident,
    pub constraints: Vec<String>,
}

impl From<&GenericParam> for GenericParamSyntax {
    fn from(param: &GenericParam) -> Self {
        Self {
            name: Ident::new(param.name.clone()),
            constraints: param.constraints.clone(),
        }
    }
}

///
/// ParamSyntax
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamSyntax {
    pub modifier: Option<ParamModifier>,
    pub ty: TypeSyntax,
    pub name: Ident,
}

impl ParamSyntax {
    #[must_use]
    pub fn new(ty: TypeSyntax, name: impl Into<String>) -> Self {
        Self {
            modifier: None,
            ty,
            name: Ident::new(name),
        }
    }

    #[must_use]
    pub const fn with_modifier(mut self, modifier: ParamModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }
}

///
/// Expr
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    /// Pre-qualified name, written as-is (`global::App.Widget`, `source`).
    Path(String),
    Member { target: Box<Self>, name: Ident },
    New { ty: TypeSyntax, args: Vec<Self> },
    Tuple(Vec<Self>),
    TypeOf(TypeSyntax),
    Assign { target: Box<Self>, name: Ident, value: Box<Self> },
    Default,
    FromEvent(Box<FromEvent>),
}

impl Expr {
    #[must_use]
    pub fn path(text: impl Into<String>) -> Self {
        Self::Path(text.into())
    }

    #[must_use]
    pub fn member(self, name: Ident) -> Self {
        Self::Member {
            target: Box::new(self),
            name,
        }
    }
}

///
/// FromEvent
///
/// `Observable.FromEvent<TDelegate, TElement>(conversion, add, remove)`: the
/// conversion wraps the subscriber's push callback in a local handler with
/// the delegate's parameter list; add/remove attach and detach that exact
/// handler per subscription.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FromEvent {
    pub factory: String,
    pub delegate: TypeSyntax,
    pub element: TypeSyntax,
    pub handler_params: Vec<ParamSyntax>,
    pub payload: Expr,
    pub event: Expr,
}

///
/// Member declarations
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Member {
    Field(Field),
    Constructor(Constructor),
    Property(Property),
    Method(Method),
    Type(TypeDecl),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub modifiers: Vec<Modifier>,
    pub ty: TypeSyntax,
    pub name: Ident,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Constructor {
    pub modifiers: Vec<Modifier>,
    pub name: Ident,
    pub params: Vec<ParamSyntax>,
    pub body: Vec<Expr>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PropertyBody {
    AutoGet,
    Expr(Expr),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub doc: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub ty: TypeSyntax,
    pub name: Ident,
    pub body: PropertyBody,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Method {
    pub doc: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub return_ty: TypeSyntax,
    pub name: Ident,
    pub generics: Vec<GenericParamSyntax>,
    pub params: Vec<ParamSyntax>,
    pub body: Expr,
}

///
/// Type declarations
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TypeKeyword {
    #[display("class")]
    Class,
    #[display("struct")]
    Struct,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    pub name: TypeSyntax,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeDecl {
    pub doc: Option<String>,
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub keyword: TypeKeyword,
    pub name: Ident,
    pub generics: Vec<GenericParamSyntax>,
    pub base: Option<TypeSyntax>,
    pub members: Vec<Member>,
}

impl TypeDecl {
    #[must_use]
    pub fn class(name: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            doc: None,
            attributes: Vec::new(),
            modifiers,
            keyword: TypeKeyword::Class,
            name: Ident::new(name),
            generics: Vec::new(),
            base: None,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn structure(name: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            keyword: TypeKeyword::Struct,
            ..Self::class(name, modifiers)
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: TypeSyntax) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn with_generics(mut self, generics: Vec<GenericParamSyntax>) -> Self {
        self.generics = generics;
        self
    }

    #[must_use]
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    /// Nested type declarations, in declaration order.
    pub fn nested(&self) -> impl Iterator<Item = &Self> {
        self.members.iter().filter_map(|m| match m {
            Member::Type(decl) => Some(decl),
            _ => None,
        })
    }

    /// Names of the properties and methods this type declares.
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter_map(|m| match m {
                Member::Property(p) => Some(p.name.as_str()),
                Member::Method(m) => Some(m.name.as_str()),
                Member::Field(f) => Some(f.name.as_str()),
                Member::Constructor(_) | Member::Type(_) => None,
            })
            .collect()
    }
}

///
/// NamespaceDecl
/// `None` places the types in the global namespace.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamespaceDecl {
    pub name: Option<String>,
    pub types: Vec<TypeDecl>,
}

///
/// CompilationUnit
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompilationUnit {
    pub header: Vec<String>,
    pub namespaces: Vec<NamespaceDecl>,
}
