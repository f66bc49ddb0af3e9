use std::collections::HashMap;
use std::sync::Arc;

use beanlens_config::ReflectionConfig;
use beanlens_types::{ClassEnv, ClassRef};
use parking_lot::RwLock;

use crate::error::Result;
use crate::reflector::Reflector;

/// Shared cache of [`Reflector`]s keyed by class.
///
/// A factory is tied to one class environment: the same `ClassRef` must always denote the same
/// class for every `env` passed to [`ReflectorFactory::find_for_class`]. Failed introspections are
/// never cached.
#[derive(Debug)]
pub struct ReflectorFactory {
    class_cache_enabled: bool,
    map_underscore_to_camel_case: bool,
    cache: RwLock<HashMap<ClassRef, Arc<Reflector>>>,
}

impl Default for ReflectorFactory {
    fn default() -> Self {
        Self::new(&ReflectionConfig::default())
    }
}

impl ReflectorFactory {
    pub fn new(config: &ReflectionConfig) -> Self {
        Self {
            class_cache_enabled: config.class_cache_enabled,
            map_underscore_to_camel_case: config.map_underscore_to_camel_case,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_class_cache_enabled(&self) -> bool {
        self.class_cache_enabled
    }

    pub fn set_class_cache_enabled(&mut self, enabled: bool) {
        self.class_cache_enabled = enabled;
    }

    /// Whether column-style names (`user_name`) should match camel-case properties (`userName`).
    pub fn map_underscore_to_camel_case(&self) -> bool {
        self.map_underscore_to_camel_case
    }

    /// The reflector for `class`, built on first use (or on every use with caching disabled).
    pub fn find_for_class(&self, env: &dyn ClassEnv, class: &ClassRef) -> Result<Arc<Reflector>> {
        if !self.class_cache_enabled {
            return Reflector::new(env, class.clone()).map(Arc::new);
        }

        if let Some(hit) = self.cache.read().get(class) {
            tracing::trace!(
                target: "beanlens.reflect",
                class = %class.display(env),
                "reflector cache hit"
            );
            return Ok(Arc::clone(hit));
        }

        let reflector = Arc::new(Reflector::new(env, class.clone())?);
        let mut cache = self.cache.write();
        // Another thread may have built the same class in the meantime; keep the first one.
        Ok(Arc::clone(cache.entry(class.clone()).or_insert(reflector)))
    }

    /// Number of cached reflectors.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}
