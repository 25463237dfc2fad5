//! Event wrapper generation.
//!
//! [`generate`] runs the static batch, then the instance batch, then the
//! extension-method unit, over one validated [`Manifest`]. Output is fully
//! determined by the manifest and the configuration.

pub mod batch;
pub mod diagnostic;
pub mod emit;
pub mod extensions;
pub mod markers;
pub mod shape;
pub mod spell;
pub mod syntax;
pub mod tree;
pub mod unit;

mod error;

pub use error::Error;

use crate::{
    batch::Batch,
    diagnostic::Diagnostic,
    emit::{InstanceEmitter, StaticEmitter},
    unit::GeneratedUnit,
};
use obsgen_config::ObsgenConfig;
use obsgen_schema::{manifest::Manifest, types::Flavor, universe::TypeUniverse};
use tracing::info;

///
/// Generation
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Generation {
    /// Static units, then instance units, then the extension unit.
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    /// Look up a unit by name.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|unit| unit.name == name)
    }
}

/// Validate `manifest` and generate every unit it requests.
pub fn generate(manifest: &Manifest, config: &ObsgenConfig) -> Result<Generation, Error> {
    config.validate()?;

    // builds the universe only from a manifest that passed validation
    let universe = manifest.universe()?;
    Generator::new(&universe, config).run(manifest)
}

///
/// Generator
/// Drives both batches over a prepared universe.
///

pub struct Generator<'a> {
    universe: &'a TypeUniverse,
    config: &'a ObsgenConfig,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub const fn new(universe: &'a TypeUniverse, config: &'a ObsgenConfig) -> Self {
        Self { universe, config }
    }

    pub fn run(&self, manifest: &Manifest) -> Result<Generation, Error> {
        let mut generation = Generation::default();
        let naming = &self.config.naming;

        let statics = Batch::new(self.universe, naming, StaticEmitter::new(self.universe, self.config))
            .run(manifest.requests(Flavor::Static))?;
        let instance =
            Batch::new(self.universe, naming, InstanceEmitter::new(self.universe, self.config))
                .run(manifest.requests(Flavor::Instance))?;

        let found = extensions::generate(self.universe, &instance.generated, self.config);

        for output in [statics, instance] {
            generation.units.extend(output.units);
            generation.diagnostics.extend(output.diagnostic);
        }
        generation.units.extend(found);

        info!(
            units = generation.units.len(),
            diagnostics = generation.diagnostics.len(),
            "generation complete"
        );

        Ok(generation)
    }
}
