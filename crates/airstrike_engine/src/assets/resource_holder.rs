//! Resource holder - identifier-keyed resource table
//!
//! Owns loaded resources and hands out references by identifier. Scene nodes
//! never own resources: they keep the identifier and the render sink resolves
//! it at draw time.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;
use thiserror::Error;

/// Resource lookup and loading errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource registered under the identifier
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The identifier is already registered
    #[error("Resource already loaded: {0}")]
    Duplicate(String),

    /// Decoding the file failed
    #[error("Failed to load {path}: {source}")]
    LoadFailed {
        /// File that failed to load
        path: String,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },
}

/// Loader capable of producing a resource from a file
pub trait ResourceLoader<R> {
    /// Load the resource stored at `path`
    fn load(&self, path: &Path) -> Result<R, ResourceError>;
}

/// Resource table keyed by a stable identifier
#[derive(Debug)]
pub struct ResourceHolder<Id, R> {
    resources: HashMap<Id, R>,
}

impl<Id, R> Default for ResourceHolder<Id, R> {
    fn default() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }
}

impl<Id, R> ResourceHolder<Id, R>
where
    Id: Copy + Eq + Hash + Debug,
{
    /// Create an empty holder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a resource from disk with `loader` and register it under `id`
    pub fn load(
        &mut self,
        loader: &impl ResourceLoader<R>,
        id: Id,
        path: impl AsRef<Path>,
    ) -> Result<(), ResourceError> {
        let path = path.as_ref();
        let resource = loader.load(path)?;
        log::debug!("Loaded {:?} from {}", id, path.display());
        self.insert(id, resource)
    }

    /// Register an already constructed resource
    pub fn insert(&mut self, id: Id, resource: R) -> Result<(), ResourceError> {
        if self.resources.contains_key(&id) {
            return Err(ResourceError::Duplicate(format!("{id:?}")));
        }
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Look up a resource
    pub fn get(&self, id: Id) -> Result<&R, ResourceError> {
        self.resources
            .get(&id)
            .ok_or_else(|| ResourceError::NotFound(format!("{id:?}")))
    }

    /// Look up a resource mutably
    pub fn get_mut(&mut self, id: Id) -> Result<&mut R, ResourceError> {
        self.resources
            .get_mut(&id)
            .ok_or_else(|| ResourceError::NotFound(format!("{id:?}")))
    }

    /// Check whether `id` is registered
    pub fn contains(&self, id: Id) -> bool {
        self.resources.contains_key(&id)
    }

    /// Number of registered resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the holder is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLoader;

    impl ResourceLoader<u32> for FixedLoader {
        fn load(&self, path: &Path) -> Result<u32, ResourceError> {
            Ok(path.as_os_str().len() as u32)
        }
    }

    #[test]
    fn test_load_and_get() {
        let mut holder: ResourceHolder<u8, u32> = ResourceHolder::new();
        holder.load(&FixedLoader, 1, "abcd").unwrap();

        assert_eq!(*holder.get(1).unwrap(), 4);
        assert!(holder.contains(1));
        assert_eq!(holder.len(), 1);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let holder: ResourceHolder<u8, u32> = ResourceHolder::new();
        assert!(matches!(holder.get(7), Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut holder: ResourceHolder<u8, u32> = ResourceHolder::new();
        holder.insert(1, 10).unwrap();

        assert!(matches!(holder.insert(1, 20), Err(ResourceError::Duplicate(_))));
        assert_eq!(*holder.get(1).unwrap(), 10);
    }
}
