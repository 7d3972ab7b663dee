//! Property descriptors: what to write into a bean after it is constructed.

use crate::value::Value;
use std::fmt;

/// Marks a property whose value is another bean, looked up by name at
/// population time instead of being taken literally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeanReference {
  bean_name: String,
}

impl BeanReference {
  pub fn new(bean_name: impl Into<String>) -> Self {
    Self {
      bean_name: bean_name.into(),
    }
  }

  pub fn bean_name(&self) -> &str {
    &self.bean_name
  }
}

/// Where a property's value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
  Literal(Value),
  Reference(BeanReference),
}

impl ValueSource {
  pub fn is_reference(&self) -> bool {
    matches!(self, ValueSource::Reference(_))
  }
}

impl From<BeanReference> for ValueSource {
  fn from(reference: BeanReference) -> Self {
    ValueSource::Reference(reference)
  }
}

impl From<Value> for ValueSource {
  fn from(value: Value) -> Self {
    ValueSource::Literal(value)
  }
}

macro_rules! impl_literal_source {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl From<$ty> for ValueSource {
        fn from(v: $ty) -> Self {
          ValueSource::Literal(Value::from(v))
        }
      }
    )+
  };
}

impl_literal_source!(bool, i64, i32, u32, f64, &str, String);

/// A single `(name, value)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
  name: String,
  value: ValueSource,
}

impl PropertyValue {
  pub fn new(name: impl Into<String>, value: impl Into<ValueSource>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn value(&self) -> &ValueSource {
    &self.value
  }
}

impl fmt::Display for PropertyValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.value {
      ValueSource::Literal(v) => write!(f, "PropertyValue{{name='{}', value={:?}}}", self.name, v),
      ValueSource::Reference(r) => {
        write!(f, "PropertyValue{{name='{}', ref='{}'}}", self.name, r.bean_name())
      }
    }
  }
}

/// An ordered set of property values.
///
/// Names are not required to be unique. Population applies every entry in
/// insertion order, so the last entry for a name is what the bean ends up
/// with, while [`PropertyValues::get_property_value`] returns the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyValues {
  property_values: Vec<PropertyValue>,
}

impl PropertyValues {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_property_value(&mut self, pv: PropertyValue) {
    self.property_values.push(pv);
  }

  /// Builder-style variant of [`PropertyValues::add_property_value`].
  pub fn with(mut self, name: impl Into<String>, value: impl Into<ValueSource>) -> Self {
    self.add_property_value(PropertyValue::new(name, value));
    self
  }

  pub fn property_values(&self) -> &[PropertyValue] {
    &self.property_values
  }

  pub fn get_property_value(&self, name: &str) -> Option<&PropertyValue> {
    self.property_values.iter().find(|pv| pv.name == name)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, PropertyValue> {
    self.property_values.iter()
  }

  pub fn len(&self) -> usize {
    self.property_values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.property_values.is_empty()
  }
}

impl<'a> IntoIterator for &'a PropertyValues {
  type Item = &'a PropertyValue;
  type IntoIter = std::slice::Iter<'a, PropertyValue>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl FromIterator<PropertyValue> for PropertyValues {
  fn from_iter<I: IntoIterator<Item = PropertyValue>>(iter: I) -> Self {
    Self {
      property_values: iter.into_iter().collect(),
    }
  }
}
