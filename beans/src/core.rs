//! Core, non-public bookkeeping for bean creation.

use crate::error::BeansError;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FACTORY_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
  // Beans currently being created on this thread, keyed by owning factory.
  static CREATING: RefCell<HashSet<CreationKey>> = RefCell::new(HashSet::new());
}

/// Hands out a process-unique id for a new factory.
pub(crate) fn next_factory_id() -> u64 {
  NEXT_FACTORY_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CreationKey {
  factory_id: u64,
  bean_name: String,
}

/// An RAII guard marking a bean as under creation.
///
/// Entering a bean that is already under creation on the same thread and
/// factory fails with `CircularDependency`. Dropping the guard clears the mark,
/// including when creation fails part-way.
pub(crate) struct CreationGuard {
  key: CreationKey,
}

impl CreationGuard {
  pub(crate) fn enter(factory_id: u64, bean_name: &str) -> Result<Self, BeansError> {
    let key = CreationKey {
      factory_id,
      bean_name: bean_name.to_owned(),
    };
    let inserted = CREATING.with(|set| set.borrow_mut().insert(key.clone()));
    if !inserted {
      return Err(BeansError::CircularDependency(bean_name.to_owned()));
    }
    Ok(Self { key })
  }
}

impl Drop for CreationGuard {
  fn drop(&mut self) {
    CREATING.with(|set| {
      set.borrow_mut().remove(&self.key);
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reentry_fails_until_guard_drops() {
    let id = next_factory_id();
    let guard = CreationGuard::enter(id, "a").unwrap();
    assert!(matches!(
      CreationGuard::enter(id, "a"),
      Err(BeansError::CircularDependency(name)) if name == "a"
    ));
    drop(guard);
    assert!(CreationGuard::enter(id, "a").is_ok());
  }

  #[test]
  fn factories_do_not_share_marks() {
    let first = next_factory_id();
    let second = next_factory_id();
    let _a = CreationGuard::enter(first, "bean").unwrap();
    assert!(CreationGuard::enter(second, "bean").is_ok());
  }
}
