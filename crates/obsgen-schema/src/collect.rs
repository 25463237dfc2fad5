//! Event collection over a type hierarchy.

use crate::{
    compare::ByName,
    node::{EventMember, Substitution, TypeDescriptor, TypeId, TypeRef},
    types::Flavor,
    universe::TypeUniverse,
};
use std::collections::BTreeSet;
use tracing::debug;

///
/// EventCollector
///
/// Gathers the events a wrapper of one flavor can reach on a type: its own,
/// those inherited through the base chain, and for interfaces those of every
/// base interface. Results are deduplicated and sorted by name; the first
/// occurrence in walk order wins.
///

pub struct EventCollector<'a> {
    universe: &'a TypeUniverse,
    flavor: Flavor,
}

impl<'a> EventCollector<'a> {
    #[must_use]
    pub const fn new(universe: &'a TypeUniverse, flavor: Flavor) -> Self {
        Self { universe, flavor }
    }

    #[must_use]
    pub fn collect(&self, ty: &TypeDescriptor) -> Vec<EventMember> {
        let mut found = BTreeSet::new();
        let mut visited = BTreeSet::new();

        self.walk(ty, &Substitution::new(), &mut visited, &mut found);

        found.into_iter().map(ByName::into_inner).collect()
    }

    fn is_eligible(&self, event: &EventMember) -> bool {
        event.is_static == self.flavor.is_static() && event.is_exposed()
    }

    fn walk(
        &self,
        ty: &TypeDescriptor,
        subst: &Substitution,
        visited: &mut BTreeSet<TypeId>,
        found: &mut BTreeSet<ByName>,
    ) {
        if !visited.insert(ty.id()) {
            return;
        }

        for event in ty.events.iter().filter(|e| self.is_eligible(e)) {
            found.insert(ByName(event.substitute(subst)));
        }

        if let Some(base) = &ty.base_type {
            self.walk_reference(base, subst, visited, found);
        }

        // static interface members are not inherited
        if ty.kind.is_interface() && !self.flavor.is_static() {
            for interface in &ty.interfaces {
                self.walk_reference(interface, subst, visited, found);
            }
        }
    }

    fn walk_reference(
        &self,
        reference: &TypeRef,
        subst: &Substitution,
        visited: &mut BTreeSet<TypeId>,
        found: &mut BTreeSet<ByName>,
    ) {
        // the reference is written in the current type's scope
        let reference = reference.substitute(subst);

        let Some(id) = reference.type_id() else {
            debug!(%reference, "base reference is not a named type");
            return;
        };

        let Some(base) = self.universe.get(&id) else {
            debug!(%id, "base type not in universe, stopping walk");
            return;
        };

        let Some(next) = base.substitution_for(&reference) else {
            debug!(%id, %reference, "base type argument count mismatch");
            return;
        };

        self.walk(base, &next, visited, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        node::{CallbackSignature, GenericParam, Parameter},
        types::Accessibility,
    };
    use proptest::prelude::*;

    fn handler() -> TypeRef {
        TypeRef::named("System", "EventHandler")
    }

    fn event(name: &str) -> EventMember {
        EventMember::new(name, handler(), CallbackSignature::default())
    }

    fn collect(universe: &TypeUniverse, id: &str, flavor: Flavor) -> Vec<EventMember> {
        let ty = universe.try_get(&TypeId::new(id)).expect("type exists");

        EventCollector::new(universe, flavor).collect(ty)
    }

    fn names(events: &[EventMember]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn inherited_event_is_collected_once() {
        let changed = EventMember::new(
            "Changed",
            TypeRef::named("System", "Action"),
            CallbackSignature::new(vec![Parameter::new(
                "value",
                TypeRef::named("System", "Object"),
            )]),
        );
        let universe = TypeUniverse::from_types([
            TypeDescriptor::class("App", "Base").with_event(changed),
            TypeDescriptor::class("App", "Derived").with_base(TypeRef::named("App", "Base")),
        ])
        .expect("universe builds");

        let events = collect(&universe, "App.Derived", Flavor::Instance);

        assert_eq!(names(&events), ["Changed"]);
        assert_eq!(events[0].declaring_type, Some(TypeId::new("App.Base")));
    }

    #[test]
    fn redeclared_event_keeps_most_derived() {
        let universe = TypeUniverse::from_types([
            TypeDescriptor::class("App", "Base").with_event(event("Changed")),
            TypeDescriptor::class("App", "Derived")
                .with_base(TypeRef::named("App", "Base"))
                .with_event(event("Changed")),
        ])
        .expect("universe builds");

        let events = collect(&universe, "App.Derived", Flavor::Instance);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].declaring_type, Some(TypeId::new("App.Derived")));
    }

    #[test]
    fn filters_by_flavor_visibility_and_hidden() {
        let universe = TypeUniverse::from_types([TypeDescriptor::class("App", "Widget")
            .with_event(event("Shown"))
            .with_event(event("Started").with_static())
            .with_event(event("Leaked").with_accessibility(Accessibility::Protected))
            .with_event(event("Obsolete").with_hidden())])
        .expect("universe builds");

        assert_eq!(
            names(&collect(&universe, "App.Widget", Flavor::Instance)),
            ["Shown"]
        );
        assert_eq!(
            names(&collect(&universe, "App.Widget", Flavor::Static)),
            ["Started"]
        );
    }

    #[test]
    fn only_inaccessible_events_yield_empty() {
        let universe = TypeUniverse::from_types([TypeDescriptor::class("App", "Widget")
            .with_event(event("Secret").with_accessibility(Accessibility::Private))])
        .expect("universe builds");

        assert!(collect(&universe, "App.Widget", Flavor::Instance).is_empty());
    }

    #[test]
    fn generic_base_arguments_are_substituted() {
        let filled = EventMember::new(
            "Filled",
            TypeRef::generic("System", "Action", vec![TypeRef::param("T")]),
            CallbackSignature::new(vec![Parameter::new("item", TypeRef::param("T"))]),
        );
        let universe = TypeUniverse::from_types([
            TypeDescriptor::class("App", "Box")
                .with_generic(GenericParam::new("T"))
                .with_event(filled),
            TypeDescriptor::class("App", "IntBox").with_base(TypeRef::generic(
                "App",
                "Box",
                vec![TypeRef::named("System", "Int32")],
            )),
        ])
        .expect("universe builds");

        let events = collect(&universe, "App.IntBox", Flavor::Instance);

        assert_eq!(events[0].signature.parameters[0].ty.to_string(), "System.Int32");
        assert_eq!(events[0].delegate.to_string(), "System.Action<System.Int32>");
    }

    #[test]
    fn interfaces_walked_for_interfaces_only() {
        let universe = TypeUniverse::from_types([
            TypeDescriptor::interface("App", "INotify").with_event(event("Notified")),
            TypeDescriptor::interface("App", "IWidget")
                .with_interface(TypeRef::named("App", "INotify"))
                .with_event(event("Clicked")),
            TypeDescriptor::class("App", "Widget")
                .with_interface(TypeRef::named("App", "INotify")),
        ])
        .expect("universe builds");

        assert_eq!(
            names(&collect(&universe, "App.IWidget", Flavor::Instance)),
            ["Clicked", "Notified"]
        );
        assert!(collect(&universe, "App.Widget", Flavor::Instance).is_empty());
    }

    #[test]
    fn cyclic_and_missing_bases_terminate() {
        let universe = TypeUniverse::from_types([
            TypeDescriptor::interface("App", "IA")
                .with_interface(TypeRef::named("App", "IB"))
                .with_interface(TypeRef::named("Elsewhere", "IMissing"))
                .with_event(event("A")),
            TypeDescriptor::interface("App", "IB")
                .with_interface(TypeRef::named("App", "IA"))
                .with_event(event("B")),
        ])
        .expect("universe builds");

        assert_eq!(names(&collect(&universe, "App.IA", Flavor::Instance)), ["A", "B"]);
    }

    proptest! {
        #[test]
        fn collected_names_are_sorted_and_unique(
            own in proptest::collection::vec("[A-Za-z]{1,6}", 0..8),
            inherited in proptest::collection::vec("[A-Za-z]{1,6}", 0..8),
        ) {
            let mut base = TypeDescriptor::class("App", "Base");
            for name in &inherited {
                base = base.with_event(event(name));
            }
            let mut derived = TypeDescriptor::class("App", "Derived")
                .with_base(TypeRef::named("App", "Base"));
            for name in &own {
                derived = derived.with_event(event(name));
            }
            let universe = TypeUniverse::from_types([base, derived]).expect("universe builds");

            let events = collect(&universe, "App.Derived", Flavor::Instance);

            for pair in events.windows(2) {
                prop_assert!(pair[0].name < pair[1].name);
            }
            let expected: BTreeSet<&String> = own.iter().chain(&inherited).collect();
            prop_assert_eq!(events.len(), expected.len());
        }
    }
}
