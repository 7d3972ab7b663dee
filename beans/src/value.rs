//! Values flowing into constructors and fields.

use crate::error::PropertyError;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// An owned, not-yet-shared bean instance. Population mutates it in place.
pub type BeanBox = Box<dyn Any + Send + Sync>;

/// A fully populated bean as handed out by the factory and the singleton cache.
pub type SharedBean = Arc<dyn Any + Send + Sync>;

/// A literal or an already resolved bean.
#[derive(Clone)]
pub enum Value {
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
  Bean(SharedBean),
}

impl Value {
  /// Short name of the variant, used in type-mismatch diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Bool(_) => "bool",
      Value::Int(_) => "integer",
      Value::Float(_) => "float",
      Value::Str(_) => "string",
      Value::Bean(_) => "bean",
    }
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Bool(v) => write!(f, "Bool({})", v),
      Value::Int(v) => write!(f, "Int({})", v),
      Value::Float(v) => write!(f, "Float({})", v),
      Value::Str(v) => write!(f, "Str({:?})", v),
      Value::Bean(_) => write!(f, "Bean(..)"),
    }
  }
}

impl PartialEq for Value {
  /// Literals compare by value, beans by identity.
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Int(a), Value::Int(b)) => a == b,
      (Value::Float(a), Value::Float(b)) => a == b,
      (Value::Str(a), Value::Str(b)) => a == b,
      (Value::Bean(a), Value::Bean(b)) => Arc::ptr_eq(a, b),
      _ => false,
    }
  }
}

impl From<bool> for Value {
  fn from(v: bool) -> Self {
    Value::Bool(v)
  }
}
impl From<i64> for Value {
  fn from(v: i64) -> Self {
    Value::Int(v)
  }
}
impl From<i32> for Value {
  fn from(v: i32) -> Self {
    Value::Int(v as i64)
  }
}
impl From<u32> for Value {
  fn from(v: u32) -> Self {
    Value::Int(v as i64)
  }
}
impl From<f64> for Value {
  fn from(v: f64) -> Self {
    Value::Float(v)
  }
}
impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Value::Str(v.to_owned())
  }
}
impl From<String> for Value {
  fn from(v: String) -> Self {
    Value::Str(v)
  }
}
impl From<SharedBean> for Value {
  fn from(v: SharedBean) -> Self {
    Value::Bean(v)
  }
}

/// Conversion from a [`Value`] into a concrete field or argument type.
///
/// No coercion happens: a string is never parsed into a number and an
/// integer is never widened into a float.
pub trait FromValue: Sized {
  fn from_value(value: Value) -> Result<Self, PropertyError>;
}

fn mismatch<T>(value: &Value) -> PropertyError {
  PropertyError::TypeMismatch {
    expected: type_name::<T>(),
    found: value.kind(),
  }
}

impl FromValue for Value {
  fn from_value(value: Value) -> Result<Self, PropertyError> {
    Ok(value)
  }
}

impl FromValue for String {
  fn from_value(value: Value) -> Result<Self, PropertyError> {
    match value {
      Value::Str(s) => Ok(s),
      other => Err(mismatch::<String>(&other)),
    }
  }
}

impl FromValue for bool {
  fn from_value(value: Value) -> Result<Self, PropertyError> {
    match value {
      Value::Bool(b) => Ok(b),
      other => Err(mismatch::<bool>(&other)),
    }
  }
}

impl FromValue for f64 {
  fn from_value(value: Value) -> Result<Self, PropertyError> {
    match value {
      Value::Float(v) => Ok(v),
      other => Err(mismatch::<f64>(&other)),
    }
  }
}

macro_rules! impl_from_value_for_int {
  ($($int:ty),+ $(,)?) => {
    $(
      impl FromValue for $int {
        fn from_value(value: Value) -> Result<Self, PropertyError> {
          match value {
            Value::Int(v) => <$int>::try_from(v).map_err(|_| PropertyError::TypeMismatch {
              expected: type_name::<$int>(),
              found: "out-of-range integer",
            }),
            other => Err(mismatch::<$int>(&other)),
          }
        }
      }
    )+
  };
}

impl_from_value_for_int!(i64, i32, u32, u64, usize);

impl<T: Any + Send + Sync> FromValue for Arc<T> {
  fn from_value(value: Value) -> Result<Self, PropertyError> {
    match value {
      Value::Bean(bean) => bean.downcast::<T>().map_err(|_| PropertyError::TypeMismatch {
        expected: type_name::<T>(),
        found: "bean of another type",
      }),
      other => Err(mismatch::<Arc<T>>(&other)),
    }
  }
}

/// Explicit constructor arguments as seen by a constructor body.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
  values: &'a [Value],
}

impl<'a> Args<'a> {
  pub(crate) fn new(values: &'a [Value]) -> Self {
    Self { values }
  }

  /// Converts the argument at `index`. Out-of-range indexes and mismatched
  /// types are reported as errors so the constructor can propagate them.
  pub fn get<V: FromValue>(&self, index: usize) -> Result<V, crate::error::BoxError> {
    let value = self
      .values
      .get(index)
      .cloned()
      .ok_or_else(|| format!("constructor argument {} is missing", index))?;
    Ok(V::from_value(value)?)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}
