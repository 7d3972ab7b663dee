//! The blueprint a factory uses to build one named bean.

use crate::class::BeanClass;
use crate::property::PropertyValues;
use std::sync::Arc;

/// Binds a [`BeanClass`] to the property values to inject after construction.
///
/// A definition always carries a `PropertyValues`, empty when none are given.
#[derive(Debug, Clone)]
pub struct BeanDefinition {
  bean_class: Arc<BeanClass>,
  property_values: PropertyValues,
}

impl BeanDefinition {
  pub fn new(bean_class: impl Into<Arc<BeanClass>>) -> Self {
    Self::with_property_values(bean_class, PropertyValues::new())
  }

  pub fn with_property_values(
    bean_class: impl Into<Arc<BeanClass>>,
    property_values: PropertyValues,
  ) -> Self {
    Self {
      bean_class: bean_class.into(),
      property_values,
    }
  }

  pub fn bean_class(&self) -> &Arc<BeanClass> {
    &self.bean_class
  }

  pub fn set_bean_class(&mut self, bean_class: impl Into<Arc<BeanClass>>) {
    self.bean_class = bean_class.into();
  }

  pub fn property_values(&self) -> &PropertyValues {
    &self.property_values
  }

  pub fn property_values_mut(&mut self) -> &mut PropertyValues {
    &mut self.property_values
  }

  pub fn set_property_values(&mut self, property_values: PropertyValues) {
    self.property_values = property_values;
  }
}
