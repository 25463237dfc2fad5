use crate::{
    Error,
    diagnostic::Diagnostic,
    emit::WrapperEmitter,
    tree,
    unit::{GeneratedUnit, assemble, unit_name},
};
use obsgen_config::NamingConfig;
use obsgen_schema::{
    collect::EventCollector,
    manifest::Request,
    node::{TypeDescriptor, TypeId},
    types::Flavor,
    universe::TypeUniverse,
};
use std::{collections::BTreeSet, iter, sync::Arc};
use tracing::{debug, info, warn};

///
/// BatchOutput
///

#[derive(Clone, Debug)]
pub struct BatchOutput {
    pub flavor: Flavor,
    pub units: Vec<GeneratedUnit>,

    /// Types that received a wrapper, in request order.
    pub generated: Vec<Arc<TypeDescriptor>>,

    /// Set once when requests were made but no unit came out.
    pub diagnostic: Option<Diagnostic>,
}

impl BatchOutput {
    const fn empty(flavor: Flavor) -> Self {
        Self {
            flavor,
            units: Vec::new(),
            generated: Vec::new(),
            diagnostic: None,
        }
    }
}

///
/// Batch
///
/// Runs one flavor over its requests. All state lives for a single
/// `run` call.
///

pub struct Batch<'a, E> {
    universe: &'a TypeUniverse,
    naming: &'a NamingConfig,
    emitter: E,
}

impl<'a, E: WrapperEmitter> Batch<'a, E> {
    #[must_use]
    pub const fn new(universe: &'a TypeUniverse, naming: &'a NamingConfig, emitter: E) -> Self {
        Self {
            universe,
            naming,
            emitter,
        }
    }

    pub fn run(&self, requests: &[Request]) -> Result<BatchOutput, Error> {
        let flavor = self.emitter.flavor();
        let mut output = BatchOutput::empty(flavor);

        let Some(first) = requests.first() else {
            return Ok(output);
        };

        let marker = self.emitter.marker();
        if !self.universe.contains(&TypeId::new(marker.as_str())) {
            return Err(Error::MarkerNotFound(marker));
        }

        let mut processed = BTreeSet::new();
        for request in requests {
            if !processed.insert(&request.type_id) {
                debug!(type_id = %request.type_id, location = %request.location, "already processed");
                continue;
            }

            let ty = self.universe.try_get(&request.type_id)?;
            if let Some(unit) = self.generate(ty) {
                output.units.push(unit);
                output.generated.push(Arc::clone(ty));
            }
        }

        if output.units.is_empty() {
            let diagnostic = Diagnostic::events_not_found(flavor, first.location.clone());
            warn!(%flavor, location = %diagnostic.location, "{}", diagnostic.message);
            output.diagnostic = Some(diagnostic);
        }

        info!(
            %flavor,
            requests = requests.len(),
            types = processed.len(),
            units = output.units.len(),
            "batch complete"
        );

        Ok(output)
    }

    fn generate(&self, ty: &TypeDescriptor) -> Option<GeneratedUnit> {
        let flavor = self.emitter.flavor();

        if let Err(reason) = self.emitter.check(ty) {
            warn!(type_name = %ty.display_name(), %flavor, %reason, "skipping type");
            return None;
        }

        let events = EventCollector::new(self.universe, flavor).collect(ty);
        if events.is_empty() {
            debug!(type_name = %ty.display_name(), %flavor, "no eligible events");
            return None;
        }

        let wrapper = match self.emitter.emit(ty, &events) {
            Ok(Some(wrapper)) => wrapper,
            Ok(None) => {
                debug!(type_name = %ty.display_name(), %flavor, "every event was skipped");
                return None;
            }
            Err(reason) => {
                warn!(type_name = %ty.display_name(), %flavor, %reason, "skipping type");
                return None;
            }
        };

        let tree = tree::place(ty, wrapper, self.naming);
        let unit = assemble(iter::once(Some(tree)))?;

        Some(GeneratedUnit::render(unit_name(ty, flavor), &unit))
    }
}
