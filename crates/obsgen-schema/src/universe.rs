use crate::{
    Error,
    node::{TypeDescriptor, TypeId},
};
use std::{collections::BTreeMap, sync::Arc};

///
/// TypeUniverse
///
/// Every type descriptor the host exported for one generation run, keyed by
/// [`TypeId`]. Built once, read-only afterwards.
///

#[derive(Clone, Debug, Default)]
pub struct TypeUniverse {
    types: BTreeMap<TypeId, Arc<TypeDescriptor>>,
}

impl TypeUniverse {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    pub fn from_types(types: impl IntoIterator<Item = TypeDescriptor>) -> Result<Self, Error> {
        let mut universe = Self::new();
        for ty in types {
            universe.insert(ty)?;
        }

        Ok(universe)
    }

    /// Insert a descriptor, stamping each event with its declaring type.
    pub fn insert(&mut self, mut ty: TypeDescriptor) -> Result<Arc<TypeDescriptor>, Error> {
        let id = ty.id();
        if self.types.contains_key(&id) {
            return Err(Error::DuplicateType(id));
        }

        for event in &mut ty.events {
            event.declaring_type = Some(id.clone());
        }

        let ty = Arc::new(ty);
        self.types.insert(id, Arc::clone(&ty));

        Ok(ty)
    }

    #[must_use]
    pub fn get(&self, id: &TypeId) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(id)
    }

    pub fn try_get(&self, id: &TypeId) -> Result<&Arc<TypeDescriptor>, Error> {
        self.get(id).ok_or_else(|| Error::UnknownType(id.clone()))
    }

    #[must_use]
    pub fn contains(&self, id: &TypeId) -> bool {
        self.types.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeId, &Arc<TypeDescriptor>)> {
        self.types.iter()
    }
}
