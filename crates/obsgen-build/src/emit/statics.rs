use super::{Accessors, TypeSkip, WrapperEmitter, reserved_names};
use crate::{
    spell::Speller,
    syntax::{Expr, GenericParamSyntax, Modifier, TypeDecl},
};
use obsgen_config::ObsgenConfig;
use obsgen_schema::{
    node::{EventMember, TypeDescriptor},
    types::Flavor,
    universe::TypeUniverse,
};

///
/// StaticEmitter
/// `internal static class Rx{Name}Statics<..>` with no per-instance state.
///

pub struct StaticEmitter<'a> {
    universe: &'a TypeUniverse,
    config: &'a ObsgenConfig,
}

impl<'a> StaticEmitter<'a> {
    #[must_use]
    pub const fn new(universe: &'a TypeUniverse, config: &'a ObsgenConfig) -> Self {
        Self { universe, config }
    }
}

impl WrapperEmitter for StaticEmitter<'_> {
    fn flavor(&self) -> Flavor {
        Flavor::Static
    }

    fn marker(&self) -> String {
        self.config.markers.static_attribute_type()
    }

    fn wrapper_name(&self, ty: &TypeDescriptor) -> String {
        self.config.naming.static_wrapper(&ty.name)
    }

    fn emit(
        &self,
        ty: &TypeDescriptor,
        events: &[EventMember],
    ) -> Result<Option<TypeDecl>, TypeSkip> {
        let speller = Speller::new(self.universe, ty);
        let target = Expr::Path(speller.spell(&ty.self_reference())?.to_string());
        let wrapper = self.wrapper_name(ty);

        let accessors = Accessors {
            speller,
            reactive: &self.config.reactive,
            reserved: reserved_names(ty, [wrapper.as_str()]),
            modifiers: vec![Modifier::Public, Modifier::Static],
        };
        let properties = accessors.build_all(ty, events, &target);

        if properties.is_empty() {
            return Ok(None);
        }

        let decl = TypeDecl::class(wrapper, vec![Modifier::Internal, Modifier::Static])
            .with_doc(format!(
                "Wraps the static events of {} as observables.",
                ty.display_name()
            ))
            .with_generics(ty.generic_params.iter().map(GenericParamSyntax::from).collect())
            .with_members(properties);

        Ok(Some(decl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ToSource;
    use obsgen_schema::{
        node::{CallbackSignature, Parameter, TypeRef},
        types::Accessibility,
    };

    #[test]
    fn static_accessors_target_the_type() {
        let universe = TypeUniverse::new();
        let config = ObsgenConfig::default();
        let ty = TypeDescriptor::class("App", "Clock");
        let events = [EventMember::new(
            "Ticked",
            TypeRef::generic("System", "Action", vec![TypeRef::named("System", "Int64")]),
            CallbackSignature::new(vec![Parameter::new("ticks", TypeRef::named("System", "Int64"))]),
        )
        .with_static()];

        let decl = StaticEmitter::new(&universe, &config)
            .emit(&ty, &events)
            .expect("emits")
            .expect("has members");
        let source = decl.to_source_string();

        assert!(source.contains("internal static class RxClockStatics"));
        assert!(source.contains("public static global::System.IObservable<long> Ticked"));
        assert!(source.contains("x => global::App.Clock.Ticked += x,"));
        assert!(source.contains("x => global::App.Clock.Ticked -= x)"));
    }

    #[test]
    fn hidden_types_are_rejected() {
        let universe = TypeUniverse::new();
        let config = ObsgenConfig::default();
        let ty = TypeDescriptor::class("App", "Secret").with_accessibility(Accessibility::Private);

        assert_eq!(
            StaticEmitter::new(&universe, &config).check(&ty),
            Err(TypeSkip::NotVisible)
        );
    }
}
