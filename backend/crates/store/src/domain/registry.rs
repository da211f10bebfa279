//! Entity Registry
//!
//! Mapping from entity name to the data-access object its schema produced.
//! Built once by the lifecycle and then shared read-only.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::error::{StoreConnectionError, StoreResult};

/// Opaque, cheaply cloneable handle to an entity's data-access object
#[derive(Clone)]
pub struct EntityHandle {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl EntityHandle {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Typed access; `None` if the handle holds another type
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().is::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityHandle").field(&self.type_name).finish()
    }
}

/// Loaded entities, in discovery order
#[derive(Clone, Default)]
pub struct EntityRegistry {
    entries: Vec<(String, EntityHandle)>,
}

impl EntityRegistry {
    pub(crate) fn insert(
        &mut self,
        name: impl Into<String>,
        handle: EntityHandle,
    ) -> StoreResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(StoreConnectionError::DuplicateEntity(name));
        }
        self.entries.push((name, handle));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn handle(&self, name: &str) -> Option<&EntityHandle> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, handle)| handle)
    }

    /// Typed lookup by name
    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.handle(name).and_then(EntityHandle::downcast::<T>)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityHandle)> {
        self.entries
            .iter()
            .map(|(name, handle)| (name.as_str(), handle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, handle)| (name, handle.type_name)))
            .finish()
    }
}
