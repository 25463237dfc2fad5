//! Structural validation of host-supplied descriptors.

use crate::{
    MAX_ENCLOSING_DEPTH,
    manifest::Manifest,
    naming::is_identifier,
    prelude::*,
};
use std::collections::{BTreeMap, BTreeSet};

/// Validate every descriptor and request in a manifest.
pub(crate) fn validate_manifest(manifest: &Manifest) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();
    let mut seen = BTreeMap::<TypeId, usize>::new();

    for (i, ty) in manifest.types.iter().enumerate() {
        let id = ty.id();
        errs.add_for(id.to_string(), validate_type(ty));

        if let Some(first) = seen.insert(id.clone(), i) {
            err!(errs, "type `{id}` declared twice (entries {first} and {i})");
        }
    }

    for (flavor, requests) in [
        ("instance", &manifest.instance),
        ("static", &manifest.statics),
    ] {
        for request in requests {
            if !seen.contains_key(&request.type_id) {
                err!(
                    errs,
                    "{flavor} request at {} names unknown type `{}`",
                    request.location,
                    request.type_id
                );
            }
        }
    }

    errs.result()
}

/// Validate a single descriptor's structure.
///
/// Type and namespace spelling is left to generation, which skips types it
/// cannot name. Only events generated code could reach must be identifiers;
/// private explicit-interface events such as `IFoo.Changed` are legal.
pub fn validate_type(ty: &TypeDescriptor) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if ty.name.is_empty() {
        err!(errs, "type with empty name");
    }

    if ty.enclosing.len() > MAX_ENCLOSING_DEPTH {
        err!(
            errs,
            "enclosing chain of {} exceeds max depth {MAX_ENCLOSING_DEPTH}",
            ty.enclosing.len()
        );
    }

    for enclosing in &ty.enclosing {
        if enclosing.name.is_empty() {
            err!(errs, "enclosing type with empty name");
        }
        validate_generic_params(&enclosing.generic_params, &mut errs);
    }
    validate_generic_params(&ty.generic_params, &mut errs);

    let mut names = BTreeSet::new();
    for event in &ty.events {
        if event.name.is_empty() {
            err!(errs, "event with empty name");
        } else if event.is_exposed() && !is_identifier(&event.name) {
            err!(errs, "event name `{}` is not an identifier", event.name);
        }

        if !names.insert(event.name.as_str()) {
            err!(errs, "event `{}` declared twice", event.name);
        }
    }

    errs
}

// Names must be identifiers and unique within one declaring level.
fn validate_generic_params(params: &[GenericParam], errs: &mut ErrorTree) {
    let mut names = BTreeSet::new();

    for param in params {
        if !is_identifier(&param.name) {
            err!(errs, "generic parameter `{}` is not an identifier", param.name);
        }
        if !names.insert(param.name.as_str()) {
            err!(errs, "generic parameter `{}` declared twice", param.name);
        }
        if param.constraints.iter().any(|c| c.trim().is_empty()) {
            err!(errs, "generic parameter `{}` has an empty constraint", param.name);
        }
    }
}
