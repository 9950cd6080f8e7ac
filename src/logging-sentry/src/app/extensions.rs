use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of the extensions initialized on an application, by name.
#[derive(Default)]
pub struct Extensions(HashMap<&'static str, Arc<dyn Any + Send + Sync>>);

impl Extensions {
    pub fn insert<T>(&mut self, name: &'static str, extension: Arc<T>)
    where
        T: Any + Send + Sync,
    {
        self.0.insert(name, extension);
    }

    /// Returns the extension registered under `name` if it is a `T`.
    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.0.get(name).cloned()?.downcast::<T>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}
