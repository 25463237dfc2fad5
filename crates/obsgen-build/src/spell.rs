//! Spelling descriptor type references as C# type syntax.
//!
//! A reference is spellable when every part of it can be written in ordinary
//! (safe) source inside the generated wrapper. Anything else is reported as
//! [`Unnameable`] and the member that needed it is skipped.

use crate::syntax::{Ident, TypeSyntax};
use obsgen_schema::{
    naming::{is_identifier, is_namespace},
    node::{TypeDescriptor, TypeId, TypeRef},
    universe::TypeUniverse,
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// Unnameable
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Unnameable {
    #[error("`{0}` is compiler-synthesized")]
    Synthesized(String),

    #[error("`{0}` requires an unsafe context")]
    Unsafe(String),

    #[error("`{0}` is not an identifier")]
    InvalidName(String),

    #[error("type parameter `{0}` is not in scope")]
    OutOfScope(String),

    #[error("type `{0}` is not accessible")]
    Inaccessible(TypeId),

    #[error("`System.Void` is not a value type")]
    Void,
}

// Metadata names written with their C# keyword alias.
fn keyword_alias(id: &str) -> Option<&'static str> {
    Some(match id {
        "System.Boolean" => "bool",
        "System.Byte" => "byte",
        "System.Char" => "char",
        "System.Decimal" => "decimal",
        "System.Double" => "double",
        "System.Int16" => "short",
        "System.Int32" => "int",
        "System.Int64" => "long",
        "System.Object" => "object",
        "System.SByte" => "sbyte",
        "System.Single" => "float",
        "System.String" => "string",
        "System.UInt16" => "ushort",
        "System.UInt32" => "uint",
        "System.UInt64" => "ulong",
        _ => return None,
    })
}

///
/// Speller
///
/// Spells references as they appear inside the wrapper for one originating
/// type: only that type's generic parameters (own and enclosing) are in scope.
///

pub struct Speller<'a> {
    universe: &'a TypeUniverse,
    scope: BTreeSet<&'a str>,
}

impl<'a> Speller<'a> {
    #[must_use]
    pub fn new(universe: &'a TypeUniverse, ty: &'a TypeDescriptor) -> Self {
        Self {
            universe,
            scope: ty.scope_params().map(|p| p.name.as_str()).collect(),
        }
    }

    pub fn spell(&self, reference: &TypeRef) -> Result<TypeSyntax, Unnameable> {
        match reference {
            TypeRef::Named {
                namespace,
                segments,
            } => self.spell_named(reference, namespace.as_deref(), segments),
            TypeRef::Param { name } => {
                if !is_identifier(name) {
                    return Err(Unnameable::InvalidName(name.clone()));
                }
                if !self.scope.contains(name.as_str()) {
                    return Err(Unnameable::OutOfScope(name.clone()));
                }

                Ok(TypeSyntax::raw(Ident::new(name.clone()).to_string()))
            }
            TypeRef::Array { element, rank } => {
                let element = self.spell(element)?;
                let commas = ",".repeat(usize::from(rank.saturating_sub(1)));

                Ok(TypeSyntax::raw(format!("{element}[{commas}]")))
            }
            TypeRef::Pointer { .. } | TypeRef::FunctionPointer { .. } => {
                Err(Unnameable::Unsafe(reference.to_string()))
            }
            TypeRef::Unspeakable { display } => Err(Unnameable::Synthesized(display.clone())),
        }
    }

    fn spell_named(
        &self,
        reference: &TypeRef,
        namespace: Option<&str>,
        segments: &[obsgen_schema::node::TypeSegment],
    ) -> Result<TypeSyntax, Unnameable> {
        let id = reference
            .type_id()
            .ok_or_else(|| Unnameable::Synthesized(reference.to_string()))?;

        if id.as_str() == "System.Void" {
            return Err(Unnameable::Void);
        }
        if let Some(alias) = keyword_alias(id.as_str()) {
            return Ok(TypeSyntax::raw(alias));
        }
        if segments.is_empty() {
            return Err(Unnameable::Synthesized(reference.to_string()));
        }
        if let Some(ty) = self.universe.get(&id)
            && !ty.is_visible()
        {
            return Err(Unnameable::Inaccessible(id));
        }

        let mut text = String::from("global::");
        if let Some(namespace) = namespace {
            if !is_namespace(namespace) {
                return Err(Unnameable::InvalidName(namespace.to_string()));
            }
            for part in namespace.split('.') {
                text.push_str(&Ident::new(part).to_string());
                text.push('.');
            }
        }

        for (i, segment) in segments.iter().enumerate() {
            if !is_identifier(&segment.name) {
                return Err(Unnameable::Synthesized(segment.name.clone()));
            }
            if i > 0 {
                text.push('.');
            }
            text.push_str(&Ident::new(segment.name.clone()).to_string());

            if !segment.args.is_empty() {
                let args = segment
                    .args
                    .iter()
                    .map(|arg| self.spell(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let args: Vec<&str> = args.iter().map(TypeSyntax::as_str).collect();
                text.push('<');
                text.push_str(&args.join(", "));
                text.push('>');
            }
        }

        Ok(TypeSyntax::raw(text))
    }
}
