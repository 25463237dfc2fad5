//! The `Events()` extension overloads for generated instance wrappers.

use crate::{
    spell::Speller,
    syntax::{
        Expr, GenericParamSyntax, Ident, Member, Method, Modifier, NamespaceDecl, ParamModifier,
        ParamSyntax, TypeDecl,
    },
    tree,
    unit::{GeneratedUnit, assemble},
};
use obsgen_config::ObsgenConfig;
use obsgen_schema::{naming::unique_name, node::TypeDescriptor, universe::TypeUniverse};
use std::sync::Arc;
use tracing::debug;

/// `{extensions_class}.FoundEvents.SourceGenerated.cs`
#[must_use]
pub fn unit_name(config: &ObsgenConfig) -> String {
    format!("{}.FoundEvents.SourceGenerated.cs", config.markers.extensions_class)
}

/// One overload per type, ordered by display name. `None` when there is
/// nothing to extend.
#[must_use]
pub fn generate(
    universe: &TypeUniverse,
    generated: &[Arc<TypeDescriptor>],
    config: &ObsgenConfig,
) -> Option<GeneratedUnit> {
    let mut types: Vec<&TypeDescriptor> = generated.iter().map(Arc::as_ref).collect();
    types.sort_by_cached_key(|ty| ty.display_name());
    types.dedup_by_key(|ty| ty.id());

    let methods: Vec<Member> = types
        .into_iter()
        .filter_map(|ty| overload(universe, ty, config).map(Member::Method))
        .collect();

    let namespace = (!methods.is_empty()).then(|| NamespaceDecl {
        name: Some(config.markers.namespace.clone()),
        types: vec![
            TypeDecl::class(
                config.markers.extensions_class.clone(),
                vec![Modifier::Internal, Modifier::Static, Modifier::Partial],
            )
            .with_members(methods),
        ],
    });
    let unit = assemble([namespace])?;

    Some(GeneratedUnit::render(unit_name(config), &unit))
}

fn overload(universe: &TypeUniverse, ty: &TypeDescriptor, config: &ObsgenConfig) -> Option<Method> {
    let source = match Speller::new(universe, ty).spell(&ty.self_reference()) {
        Ok(source) => source,
        Err(reason) => {
            debug!(type_name = %ty.display_name(), %reason, "no extension overload");
            return None;
        }
    };

    let wrapper = config.naming.instance_wrapper(&ty.name);
    let wrapper = tree::wrapper_path(ty, &wrapper, &config.naming);
    let item = unique_name("item", |name| ty.scope_params().any(|p| p.name == name));

    Some(Method {
        doc: Some(format!("Gets observable wrappers for the events of {}.", ty.display_name())),
        modifiers: vec![Modifier::Public, Modifier::Static],
        return_ty: wrapper.clone(),
        name: Ident::new("Events"),
        generics: ty.scope_params().map(GenericParamSyntax::from).collect(),
        params: vec![ParamSyntax::new(source, item.clone()).with_modifier(ParamModifier::This)],
        body: Expr::New {
            ty: wrapper,
            args: vec![Expr::path(item)],
        },
    })
}
