//! Push-value shape of an event's callback.

use crate::{
    spell::{Speller, Unnameable},
    syntax::{Expr, Ident, ParamModifier, ParamSyntax, TypeSyntax},
};
use obsgen_config::ReactiveConfig;
use obsgen_schema::{
    naming::is_identifier,
    node::{CallbackSignature, Parameter},
    types::RefKind,
};
use std::collections::BTreeSet;

// Members every ValueTuple already declares; elements may not reuse them.
const TUPLE_RESERVED: [&str; 7] = [
    "CompareTo",
    "Deconstruct",
    "Equals",
    "GetHashCode",
    "GetType",
    "Rest",
    "ToString",
];

///
/// PushShape
///
/// What one firing delivers to subscribers: nothing, the single argument,
/// or an ordered tuple of all arguments.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PushShape<'a> {
    Empty,
    Single(&'a Parameter),
    Tuple(&'a [Parameter]),
}

/// Classify a callback signature. Total over parameter counts.
#[must_use]
pub fn classify(signature: &CallbackSignature) -> PushShape<'_> {
    match signature.parameters.as_slice() {
        [] => PushShape::Empty,
        [single] => PushShape::Single(single),
        params => PushShape::Tuple(params),
    }
}

///
/// Push
/// Lowered shape: stream element type, handler parameters, pushed value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Push {
    pub element: TypeSyntax,
    pub handler_params: Vec<ParamSyntax>,
    pub payload: Expr,
}

impl PushShape<'_> {
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Tuple(params) => params.len(),
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Self::Empty => &[],
            Self::Single(param) => std::slice::from_ref(*param),
            Self::Tuple(params) => params,
        }
    }

    /// Spell the element type and handler for this shape.
    pub fn lower(&self, speller: &Speller<'_>, reactive: &ReactiveConfig) -> Result<Push, Unnameable> {
        let params = self.parameters();
        let types = params
            .iter()
            .map(|p| speller.spell(&p.ty))
            .collect::<Result<Vec<_>, _>>()?;

        let handler_params = params
            .iter()
            .zip(&types)
            .enumerate()
            .map(|(i, (param, ty))| {
                let syntax = ParamSyntax::new(ty.clone(), format!("arg{i}"));
                match param.ref_kind {
                    RefKind::In => syntax.with_modifier(ParamModifier::In),
                    RefKind::Ref => syntax.with_modifier(ParamModifier::Ref),
                    RefKind::None | RefKind::Out => syntax,
                }
            })
            .collect::<Vec<_>>();

        let push = match self {
            Self::Empty => Push {
                element: TypeSyntax::raw(reactive.unit.clone()),
                handler_params,
                payload: Expr::path(format!("{}.Default", reactive.unit)),
            },
            Self::Single(_) => Push {
                element: types[0].clone(),
                handler_params,
                payload: Expr::path("arg0"),
            },
            Self::Tuple(params) => {
                let names = tuple_element_names(params);
                let elements: Vec<String> = types
                    .iter()
                    .zip(&names)
                    .map(|(ty, name)| match name {
                        Some(name) => format!("{ty} {name}"),
                        None => ty.to_string(),
                    })
                    .collect();

                Push {
                    element: TypeSyntax::raw(format!("({})", elements.join(", "))),
                    handler_params,
                    payload: Expr::Tuple(
                        (0..params.len()).map(|i| Expr::path(format!("arg{i}"))).collect(),
                    ),
                }
            }
        };

        Ok(push)
    }
}

/// Tuple element names taken from the callback's parameter names.
/// Unusable names (invalid, duplicated, or clashing with `ValueTuple`
/// members) leave that element unnamed.
#[must_use]
pub fn tuple_element_names(params: &[Parameter]) -> Vec<Option<Ident>> {
    let mut used = BTreeSet::new();

    params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let name = param.name.as_str();
            let usable = is_identifier(name)
                && !TUPLE_RESERVED.contains(&name)
                && !is_foreign_item_name(name, i)
                && used.insert(name);

            usable.then(|| Ident::new(name))
        })
        .collect()
}

// `ItemN` is only allowed at position N.
fn is_foreign_item_name(name: &str, index: usize) -> bool {
    name.strip_prefix("Item")
        .and_then(|n| n.parse::<usize>().ok())
        .is_some_and(|n| n != index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use obsgen_schema::{
        node::{GenericParam, TypeDescriptor, TypeRef},
        universe::TypeUniverse,
    };
    use proptest::prelude::*;

    fn int(name: &str) -> Parameter {
        Parameter::new(name, TypeRef::named("System", "Int32"))
    }

    fn lower(signature: &CallbackSignature) -> Result<Push, Unnameable> {
        let ty = TypeDescriptor::class("App", "Box").with_generic(GenericParam::new("T"));
        let universe = TypeUniverse::new();
        let speller = Speller::new(&universe, &ty);

        classify(signature).lower(&speller, &ReactiveConfig::default())
    }

    #[test]
    fn zero_parameters_push_unit() {
        let push = lower(&CallbackSignature::default()).expect("lowers");

        assert_eq!(push.element.as_str(), "global::System.Reactive.Unit");
        assert_eq!(
            push.payload,
            Expr::path("global::System.Reactive.Unit.Default")
        );
        assert!(push.handler_params.is_empty());
    }

    #[test]
    fn single_parameter_pushes_value() {
        let signature = CallbackSignature::new(vec![Parameter::new("item", TypeRef::param("T"))]);
        let push = lower(&signature).expect("lowers");

        assert!(matches!(classify(&signature), PushShape::Single(p) if p.name == "item"));
        assert_eq!(push.element.as_str(), "T");
        assert_eq!(push.payload, Expr::path("arg0"));
    }

    #[test]
    fn two_parameters_push_named_tuple() {
        let signature = CallbackSignature::new(vec![int("width"), int("height")]);
        let push = lower(&signature).expect("lowers");

        assert_eq!(push.element.as_str(), "(int width, int height)");
        assert_eq!(
            push.payload,
            Expr::Tuple(vec![Expr::path("arg0"), Expr::path("arg1")])
        );
    }

    #[test]
    fn ref_kinds_carry_into_handler() {
        let signature = CallbackSignature::new(vec![
            int("a").with_ref_kind(RefKind::Ref),
            int("b").with_ref_kind(RefKind::In),
        ]);
        let push = lower(&signature).expect("lowers");

        assert_eq!(push.handler_params[0].modifier, Some(ParamModifier::Ref));
        assert_eq!(push.handler_params[1].modifier, Some(ParamModifier::In));
    }

    #[test]
    fn unnameable_parameter_fails_lowering() {
        let signature = CallbackSignature::new(vec![
            int("a"),
            Parameter::new("b", TypeRef::unspeakable("<>f__AnonymousType0<int>")),
        ]);

        assert!(matches!(lower(&signature), Err(Unnameable::Synthesized(_))));
    }

    #[test]
    fn clashing_tuple_names_are_dropped() {
        let names = tuple_element_names(&[
            int("Item2"),
            int("Item2"),
            int("Rest"),
            int("x"),
            int("x"),
            int(""),
        ]);
        let rendered: Vec<Option<&str>> = names.iter().map(|n| n.as_ref().map(Ident::as_str)).collect();

        assert_eq!(
            rendered,
            [None, Some("Item2"), None, Some("x"), None, None]
        );
    }

    proptest! {
        #[test]
        fn classification_is_total(count in 0usize..24) {
            let params: Vec<Parameter> = (0..count).map(|i| int(&format!("p{i}"))).collect();
            let signature = CallbackSignature::new(params);
            let shape = classify(&signature);

            prop_assert_eq!(shape.arity(), count);
            match count {
                0 => prop_assert!(matches!(shape, PushShape::Empty)),
                1 => prop_assert!(matches!(shape, PushShape::Single(_))),
                _ => prop_assert!(matches!(shape, PushShape::Tuple(p) if p.len() == count)),
            }

            let push = lower(&signature).expect("int parameters are always nameable");
            prop_assert_eq!(push.handler_params.len(), count);
        }
    }
}
