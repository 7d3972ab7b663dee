//! Type descriptors: how to construct a type and how to write its fields by name.

use crate::error::{BoxError, PropertyError};
use crate::value::{Args, BeanBox, FromValue, Value};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type ConstructorFn = dyn Fn(&Args<'_>) -> Result<BeanBox, BoxError> + Send + Sync;
type SetterFn = dyn Fn(&mut (dyn Any + Send + Sync), Value) -> Result<(), PropertyError> + Send + Sync;

/// A declared constructor. Only its arity is visible to constructor selection.
#[derive(Clone)]
pub struct Constructor {
  arity: usize,
  body: Arc<ConstructorFn>,
}

impl Constructor {
  pub fn arity(&self) -> usize {
    self.arity
  }

  /// Runs the constructor body with the given arguments.
  pub fn invoke(&self, args: &[Value]) -> Result<BeanBox, BoxError> {
    (self.body)(&Args::new(args))
  }
}

impl fmt::Debug for Constructor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Constructor(arity = {})", self.arity)
  }
}

/// Describes a constructible bean type.
///
/// Holds the constructors in declaration order and a name → setter table
/// used for late-bound property assignment.
pub struct BeanClass {
  type_id: TypeId,
  type_name: &'static str,
  constructors: Vec<Constructor>,
  setters: HashMap<String, Arc<SetterFn>>,
}

impl BeanClass {
  pub fn builder<T: Any + Send + Sync>() -> BeanClassBuilder<T> {
    BeanClassBuilder {
      constructors: Vec::new(),
      setters: HashMap::new(),
      _marker: PhantomData,
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn is<T: Any>(&self) -> bool {
    self.type_id == TypeId::of::<T>()
  }

  pub fn declared_constructors(&self) -> &[Constructor] {
    &self.constructors
  }

  /// First declared constructor with exactly `arity` parameters.
  pub fn find_constructor(&self, arity: usize) -> Option<&Constructor> {
    self.constructors.iter().find(|c| c.arity == arity)
  }

  pub fn has_field(&self, name: &str) -> bool {
    self.setters.contains_key(name)
  }

  pub fn field_names(&self) -> impl Iterator<Item = &str> {
    self.setters.keys().map(String::as_str)
  }

  /// Writes `value` into the field `name` of `target`.
  pub fn set_field(
    &self,
    target: &mut (dyn Any + Send + Sync),
    name: &str,
    value: Value,
  ) -> Result<(), PropertyError> {
    let setter = self.setters.get(name).ok_or_else(|| PropertyError::NoSuchField {
      type_name: self.type_name,
      field: name.to_owned(),
    })?;
    setter(target, value)
  }
}

impl fmt::Debug for BeanClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut fields: Vec<&str> = self.field_names().collect();
    fields.sort_unstable();
    f.debug_struct("BeanClass")
      .field("type_name", &self.type_name)
      .field("constructors", &self.constructors)
      .field("fields", &fields)
      .finish()
  }
}

/// Builder returned by [`BeanClass::builder`].
pub struct BeanClassBuilder<T> {
  constructors: Vec<Constructor>,
  setters: HashMap<String, Arc<SetterFn>>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> BeanClassBuilder<T> {
  /// Declares a constructor taking `arity` arguments.
  pub fn constructor<F>(mut self, arity: usize, body: F) -> Self
  where
    F: Fn(&Args<'_>) -> Result<T, BoxError> + Send + Sync + 'static,
  {
    self.constructors.push(Constructor {
      arity,
      body: Arc::new(move |args: &Args<'_>| body(args).map(|t| Box::new(t) as BeanBox)),
    });
    self
  }

  /// Declares a field writable by name. The value is converted to `V`
  /// before the setter runs; a failed conversion is a type mismatch.
  pub fn field<V, F>(mut self, name: &str, setter: F) -> Self
  where
    V: FromValue,
    F: Fn(&mut T, V) + Send + Sync + 'static,
  {
    let setter: Arc<SetterFn> = Arc::new(move |target: &mut (dyn Any + Send + Sync), value: Value| {
      let target = target
        .downcast_mut::<T>()
        .ok_or(PropertyError::TypeMismatch {
          expected: type_name::<T>(),
          found: "instance of another type",
        })?;
      setter(target, V::from_value(value)?);
      Ok(())
    });
    self.setters.insert(name.to_owned(), setter);
    self
  }

  pub fn build(self) -> BeanClass {
    BeanClass {
      type_id: TypeId::of::<T>(),
      type_name: type_name::<T>(),
      constructors: self.constructors,
      setters: self.setters,
    }
  }
}

impl<T: Any + Send + Sync + Default> BeanClassBuilder<T> {
  /// Declares a zero-argument constructor backed by `T::default()`.
  pub fn default_constructor(self) -> Self {
    self.constructor(0, |_| Ok(T::default()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Account {
    owner: String,
    balance: i64,
  }

  fn account_class() -> BeanClass {
    BeanClass::builder::<Account>()
      .default_constructor()
      .constructor(2, |args| {
        Ok(Account {
          owner: args.get(0)?,
          balance: args.get(1)?,
        })
      })
      .constructor(2, |_| Err("never selected".into()))
      .field("owner", |a: &mut Account, v: String| a.owner = v)
      .field("balance", |a: &mut Account, v: i64| a.balance = v)
      .build()
  }

  #[test]
  fn first_declared_constructor_wins_per_arity() {
    let class = account_class();
    let ctor = class.find_constructor(2).unwrap();
    let raw = ctor.invoke(&[Value::from("ann"), Value::from(5)]).unwrap();
    let account = raw.downcast::<Account>().unwrap();
    assert_eq!(account.owner, "ann");
    assert_eq!(account.balance, 5);
    assert!(class.find_constructor(1).is_none());
    assert_eq!(class.declared_constructors().len(), 3);
  }

  #[test]
  fn set_field_checks_name_and_type() {
    let class = account_class();
    let mut raw = class.find_constructor(0).unwrap().invoke(&[]).unwrap();

    class.set_field(raw.as_mut(), "owner", Value::from("bob")).unwrap();
    assert!(matches!(
      class.set_field(raw.as_mut(), "missing", Value::from(1)),
      Err(PropertyError::NoSuchField { .. })
    ));
    assert!(matches!(
      class.set_field(raw.as_mut(), "balance", Value::from("lots")),
      Err(PropertyError::TypeMismatch { .. })
    ));

    assert_eq!(raw.downcast_ref::<Account>().unwrap().owner, "bob");
    assert!(class.is::<Account>());
    assert!(class.has_field("balance"));
  }
}
