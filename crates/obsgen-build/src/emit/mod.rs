//! Wrapper emitters, one per member flavor.

mod instance;
mod statics;

pub use instance::InstanceEmitter;
pub use statics::StaticEmitter;

use crate::{
    shape::classify,
    spell::{Speller, Unnameable},
    syntax::{Expr, FromEvent, Ident, Member, Modifier, Property, PropertyBody, TypeDecl, TypeSyntax},
};
use obsgen_config::ReactiveConfig;
use obsgen_schema::{
    node::{EventMember, TypeDescriptor},
    types::{Flavor, RefKind},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// WrapperEmitter
///
/// Builds the events wrapper declaration for one originating type. The
/// returned declaration is bare; the tree builder places it.
///

pub trait WrapperEmitter {
    fn flavor(&self) -> Flavor;

    /// Metadata name of the marker declaration this flavor's requests come from.
    fn marker(&self) -> String;

    fn wrapper_name(&self, ty: &TypeDescriptor) -> String;

    /// Whether `ty` can host a wrapper of this flavor at all.
    fn check(&self, ty: &TypeDescriptor) -> Result<(), TypeSkip> {
        if ty.is_visible() {
            Ok(())
        } else {
            Err(TypeSkip::NotVisible)
        }
    }

    /// `Ok(None)` when no event survived member-level skips.
    fn emit(
        &self,
        ty: &TypeDescriptor,
        events: &[EventMember],
    ) -> Result<Option<TypeDecl>, TypeSkip>;
}

///
/// TypeSkip
/// Reasons a whole type produces no wrapper.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum TypeSkip {
    #[error("type or one of its enclosing types is not accessible")]
    NotVisible,

    #[error("value types cannot be observed through a copied instance")]
    ValueType,

    #[error("type parameter `{0}` is declared at more than one nesting level")]
    RepeatedTypeParam(String),

    #[error("type cannot be referenced: {0}")]
    Unnameable(#[from] Unnameable),
}

///
/// SkipReason
/// Reasons a single event is left out of its wrapper.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum SkipReason {
    #[error("delegate type: {0}")]
    Delegate(Unnameable),

    #[error("parameter type: {0}")]
    Parameter(Unnameable),

    #[error("callback returns a value")]
    ReturnsValue,

    #[error("parameter `{0}` is an out parameter")]
    OutParameter(String),

    #[error("name collides with `{0}`")]
    Collision(String),
}

///
/// Accessors
/// Shared accessor-property builder for both flavors.
///

pub(crate) struct Accessors<'a> {
    pub speller: Speller<'a>,
    pub reactive: &'a ReactiveConfig,
    pub reserved: BTreeSet<String>,
    pub modifiers: Vec<Modifier>,
}

impl Accessors<'_> {
    /// One property per event that can be wrapped, in event order.
    pub fn build_all(&self, ty: &TypeDescriptor, events: &[EventMember], target: &Expr) -> Vec<Member> {
        events
            .iter()
            .filter_map(|event| match self.build(event, target) {
                Ok(property) => Some(Member::Property(property)),
                Err(reason) => {
                    debug!(
                        type_name = %ty.display_name(),
                        event = %event.name,
                        %reason,
                        "skipping event"
                    );
                    None
                }
            })
            .collect()
    }

    pub fn build(&self, event: &EventMember, target: &Expr) -> Result<Property, SkipReason> {
        if self.reserved.contains(&event.name) {
            return Err(SkipReason::Collision(event.name.clone()));
        }
        if !event.signature.is_void() {
            return Err(SkipReason::ReturnsValue);
        }
        if let Some(param) = event
            .signature
            .parameters
            .iter()
            .find(|p| p.ref_kind == RefKind::Out)
        {
            return Err(SkipReason::OutParameter(param.name.clone()));
        }

        let delegate = self
            .speller
            .spell(&event.delegate)
            .map_err(SkipReason::Delegate)?;
        let push = classify(&event.signature)
            .lower(&self.speller, self.reactive)
            .map_err(SkipReason::Parameter)?;

        let name = Ident::new(event.name.clone());
        let from_event = FromEvent {
            factory: self.reactive.from_event.clone(),
            delegate,
            element: push.element.clone(),
            handler_params: push.handler_params,
            payload: push.payload,
            event: target.clone().member(name.clone()),
        };

        Ok(Property {
            doc: Some(format!(
                "Gets an observable which signals when the {} event triggers.",
                event.name
            )),
            modifiers: self.modifiers.clone(),
            ty: TypeSyntax::generic(&self.reactive.observable, &[push.element]),
            name,
            body: PropertyBody::Expr(Expr::FromEvent(Box::new(from_event))),
        })
    }
}

// Names an event accessor may not take inside a wrapper.
pub(crate) fn reserved_names<'a>(
    ty: &'a TypeDescriptor,
    extra: impl IntoIterator<Item = &'a str>,
) -> BTreeSet<String> {
    ty.scope_params()
        .map(|p| p.name.as_str())
        .chain(extra)
        .map(ToString::to_string)
        .collect()
}
