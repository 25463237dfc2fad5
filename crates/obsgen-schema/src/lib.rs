//! Descriptor model for obsgen.
//!
//! Hosts export their symbol graph as plain, immutable descriptors
//! ([`node::TypeDescriptor`], [`node::EventMember`], [`node::CallbackSignature`]).
//! This crate owns that model, the name ordering used for deterministic output,
//! and the event collector that walks a type hierarchy.

pub mod collect;
pub mod compare;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod node;
pub mod types;
pub mod universe;
pub mod validate;

use crate::{error::ErrorTree, node::TypeId};
use thiserror::Error as ThisError;

/// Maximum nesting depth accepted for enclosing type chains.
pub const MAX_ENCLOSING_DEPTH: usize = 32;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{Accessibility, Flavor, RefKind, TypeKind},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(ErrorTree),

    #[error("duplicate type `{0}` in universe")]
    DuplicateType(TypeId),

    #[error("unknown type `{0}`")]
    UnknownType(TypeId),

    #[error("failed to parse manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
