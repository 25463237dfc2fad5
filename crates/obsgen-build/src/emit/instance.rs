use super::{Accessors, TypeSkip, WrapperEmitter, reserved_names};
use crate::{
    spell::Speller,
    syntax::{
        Constructor, Expr, Field, GenericParamSyntax, Ident, Member, Modifier, ParamSyntax,
        TypeDecl,
    },
};
use obsgen_config::ObsgenConfig;
use obsgen_schema::{
    naming::unique_name,
    node::{EventMember, TypeDescriptor},
    types::{Flavor, TypeKind},
    universe::TypeUniverse,
};
use std::collections::BTreeSet;

///
/// InstanceEmitter
///
/// `internal sealed class Rx{Name}Events<..>` holding the source instance;
/// each accessor attaches to `this._source.{Event}` per subscription.
///

pub struct InstanceEmitter<'a> {
    universe: &'a TypeUniverse,
    config: &'a ObsgenConfig,
}

impl<'a> InstanceEmitter<'a> {
    #[must_use]
    pub const fn new(universe: &'a TypeUniverse, config: &'a ObsgenConfig) -> Self {
        Self { universe, config }
    }
}

impl WrapperEmitter for InstanceEmitter<'_> {
    fn flavor(&self) -> Flavor {
        Flavor::Instance
    }

    fn marker(&self) -> String {
        self.config.markers.extensions_type()
    }

    fn wrapper_name(&self, ty: &TypeDescriptor) -> String {
        self.config.naming.instance_wrapper(&ty.name)
    }

    fn check(&self, ty: &TypeDescriptor) -> Result<(), TypeSkip> {
        if !ty.is_visible() {
            return Err(TypeSkip::NotVisible);
        }
        if ty.kind == TypeKind::Struct {
            return Err(TypeSkip::ValueType);
        }

        // the extension overload flattens every level's parameters into one list
        let mut seen = BTreeSet::new();
        for param in ty.scope_params() {
            if !seen.insert(param.name.as_str()) {
                return Err(TypeSkip::RepeatedTypeParam(param.name.clone()));
            }
        }

        Ok(())
    }

    fn emit(
        &self,
        ty: &TypeDescriptor,
        events: &[EventMember],
    ) -> Result<Option<TypeDecl>, TypeSkip> {
        let speller = Speller::new(self.universe, ty);
        let source = speller.spell(&ty.self_reference())?;
        let wrapper = self.wrapper_name(ty);

        let field = unique_name(&self.config.naming.source_field, |name| {
            name == wrapper
                || events.iter().any(|e| e.name == name)
                || ty.scope_params().any(|p| p.name == name)
        });

        let accessors = Accessors {
            speller,
            reactive: &self.config.reactive,
            reserved: reserved_names(ty, [wrapper.as_str(), field.as_str()]),
            modifiers: vec![Modifier::Public],
        };
        let target = Expr::path("this").member(Ident::new(field.clone()));
        let properties = accessors.build_all(ty, events, &target);

        if properties.is_empty() {
            return Ok(None);
        }

        let mut members = vec![
            Member::Field(Field {
                modifiers: vec![Modifier::Private, Modifier::Readonly],
                ty: source.clone(),
                name: Ident::new(field.clone()),
            }),
            Member::Constructor(Constructor {
                modifiers: vec![Modifier::Public],
                name: Ident::new(wrapper.clone()),
                params: vec![ParamSyntax::new(source, "source")],
                body: vec![Expr::Assign {
                    target: Box::new(Expr::path("this")),
                    name: Ident::new(field),
                    value: Box::new(Expr::path("source")),
                }],
            }),
        ];
        members.extend(properties);

        let decl = TypeDecl::class(wrapper, vec![Modifier::Internal, Modifier::Sealed])
            .with_doc(format!(
                "Wraps the events of {} as observables.",
                ty.display_name()
            ))
            .with_generics(ty.generic_params.iter().map(GenericParamSyntax::from).collect())
            .with_members(members);

        Ok(Some(decl))
    }
}
