//! The singleton cache and the definition-registry seam.

use crate::definition::BeanDefinition;
use crate::value::SharedBean;
use dashmap::DashMap;

/// Read access to fully built singletons.
pub trait SingletonBeanRegistry {
  /// Pure lookup; never triggers construction.
  fn get_singleton(&self, bean_name: &str) -> Option<SharedBean>;

  fn contains_singleton(&self, bean_name: &str) -> bool {
    self.get_singleton(bean_name).is_some()
  }
}

/// Anything that accepts bean definitions by name.
pub trait BeanDefinitionRegistry {
  /// Inserts or replaces the definition stored under `bean_name`.
  fn register_bean_definition(&self, bean_name: &str, bean_definition: BeanDefinition);

  fn contains_bean_definition(&self, bean_name: &str) -> bool;
}

/// A name → instance map. Last writer wins.
#[derive(Default)]
pub struct DefaultSingletonBeanRegistry {
  singleton_objects: DashMap<String, SharedBean>,
}

impl DefaultSingletonBeanRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `singleton_object` under `bean_name`, replacing any previous entry.
  pub fn add_singleton(&self, bean_name: &str, singleton_object: SharedBean) {
    self.singleton_objects.insert(bean_name.to_owned(), singleton_object);
  }

  pub fn singleton_count(&self) -> usize {
    self.singleton_objects.len()
  }

  pub fn singleton_names(&self) -> Vec<String> {
    self
      .singleton_objects
      .iter()
      .map(|entry| entry.key().clone())
      .collect()
  }
}

impl SingletonBeanRegistry for DefaultSingletonBeanRegistry {
  fn get_singleton(&self, bean_name: &str) -> Option<SharedBean> {
    // Clone the Arc out so no shard lock outlives this call.
    self
      .singleton_objects
      .get(bean_name)
      .map(|entry| entry.value().clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  #[test]
  fn put_overwrites_and_get_is_pure() {
    let registry = DefaultSingletonBeanRegistry::new();
    assert!(registry.get_singleton("a").is_none());
    assert_eq!(registry.singleton_count(), 0);

    let first: SharedBean = Arc::new(1u8);
    let second: SharedBean = Arc::new(2u8);
    registry.add_singleton("a", first);
    registry.add_singleton("a", second.clone());

    assert!(Arc::ptr_eq(&registry.get_singleton("a").unwrap(), &second));
    assert_eq!(registry.singleton_count(), 1);
    assert!(registry.contains_singleton("a"));
    assert_eq!(registry.singleton_names(), vec!["a".to_string()]);
  }
}
