//! Places a wrapper next to its originating type.
//!
//! Every enclosing type becomes a `static partial` container with the same
//! generic parameters and constraints, so wrappers from different units
//! merge into one container and the source type is never touched.

use crate::syntax::{GenericParamSyntax, Ident, Member, Modifier, NamespaceDecl, TypeDecl, TypeSyntax};
use obsgen_config::NamingConfig;
use obsgen_schema::node::{GenericParam, TypeDescriptor};

/// Wrap `wrapper` in containers mirroring `ty`'s enclosing chain and its namespace.
#[must_use]
pub fn place(ty: &TypeDescriptor, wrapper: TypeDecl, naming: &NamingConfig) -> NamespaceDecl {
    let outermost = ty.enclosing.iter().rev().fold(wrapper, |inner, enclosing| {
        TypeDecl::class(
            naming.container(&enclosing.name),
            vec![Modifier::Internal, Modifier::Static, Modifier::Partial],
        )
        .with_generics(generics(&enclosing.generic_params))
        .with_members(vec![Member::Type(inner)])
    });

    NamespaceDecl {
        name: ty.namespace.clone(),
        types: vec![outermost],
    }
}

/// Fully qualified reference to the wrapper `place` produces, with every
/// level's own parameters as arguments.
#[must_use]
pub fn wrapper_path(ty: &TypeDescriptor, wrapper: &str, naming: &NamingConfig) -> TypeSyntax {
    let mut path = String::from("global::");
    if let Some(namespace) = &ty.namespace {
        for part in namespace.split('.') {
            path.push_str(&Ident::new(part).to_string());
            path.push('.');
        }
    }

    let levels = ty
        .enclosing
        .iter()
        .map(|e| (naming.container(&e.name), &e.generic_params))
        .chain(std::iter::once((wrapper.to_string(), &ty.generic_params)));

    for (i, (name, params)) in levels.enumerate() {
        if i > 0 {
            path.push('.');
        }
        path.push_str(&Ident::new(name).to_string());

        let args: Vec<TypeSyntax> = params
            .iter()
            .map(|p| TypeSyntax::raw(Ident::new(p.name.clone()).to_string()))
            .collect();
        if !args.is_empty() {
            path = TypeSyntax::generic(&path, &args).to_string();
        }
    }

    TypeSyntax::raw(path)
}

fn generics(params: &[GenericParam]) -> Vec<GenericParamSyntax> {
    params.iter().map(GenericParamSyntax::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ToSource;
    use obsgen_schema::node::EnclosingType;

    fn nested() -> TypeDescriptor {
        TypeDescriptor::class("App.Ui", "Inner")
            .with_enclosing(
                EnclosingType::new("Outer")
                    .with_generic(GenericParam::new("TKey").with_constraint("notnull")),
            )
            .with_enclosing(EnclosingType::new("Middle"))
            .with_generic(GenericParam::new("TValue"))
    }

    #[test]
    fn top_level_type_is_placed_in_its_namespace() {
        let ty = TypeDescriptor::class("App", "Widget");
        let namespace = place(&ty, TypeDecl::class("RxWidgetEvents", vec![]), &NamingConfig::default());

        assert_eq!(namespace.name.as_deref(), Some("App"));
        assert_eq!(namespace.types.len(), 1);
        assert_eq!(namespace.types[0].name.as_str(), "RxWidgetEvents");
    }

    #[test]
    fn enclosing_chain_becomes_containers() {
        let ty = nested();
        let namespace = place(&ty, TypeDecl::class("RxInnerEvents", vec![]), &NamingConfig::default());

        let outer = &namespace.types[0];
        assert_eq!(outer.name.as_str(), "RxOuterNested");
        assert_eq!(outer.generics[0].constraints, ["notnull"]);

        let middle = outer.nested().next().expect("middle container");
        assert_eq!(middle.name.as_str(), "RxMiddleNested");
        assert!(middle.generics.is_empty());

        let inner = middle.nested().next().expect("wrapper");
        assert_eq!(inner.name.as_str(), "RxInnerEvents");

        assert!(
            namespace
                .to_source_string()
                .contains("internal static partial class RxOuterNested<TKey>\n        where TKey : notnull\n")
        );
    }

    #[test]
    fn wrapper_path_carries_every_level() {
        let path = wrapper_path(&nested(), "RxInnerEvents", &NamingConfig::default());

        assert_eq!(
            path.as_str(),
            "global::App.Ui.RxOuterNested<TKey>.RxMiddleNested.RxInnerEvents<TValue>"
        );
    }

    #[test]
    fn global_namespace_types_have_no_namespace() {
        let ty = TypeDescriptor::class("", "Loose");

        let path = wrapper_path(&ty, "RxLooseEvents", &NamingConfig::default());
        assert_eq!(path.as_str(), "global::RxLooseEvents");
        assert_eq!(
            place(&ty, TypeDecl::class("RxLooseEvents", vec![]), &NamingConfig::default()).name,
            None
        );
    }
}
