//! The bean factory: definition lookup, instantiation and property population.

use crate::config::FactoryConfig;
use crate::core::{next_factory_id, CreationGuard};
use crate::definition::BeanDefinition;
use crate::error::{BeansError, InstantiationError, PropertyError, Result};
use crate::property::ValueSource;
use crate::registry::{BeanDefinitionRegistry, DefaultSingletonBeanRegistry, SingletonBeanRegistry};
use crate::strategy::InstantiationStrategy;
use crate::value::{BeanBox, SharedBean, Value};
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::sync::Arc;
use tracing::{debug, trace};

/// Retrieval of named beans.
pub trait BeanFactory {
  /// Returns the singleton named `name`, creating it on first request.
  fn get_bean(&self, name: &str) -> Result<SharedBean>;

  /// Like [`BeanFactory::get_bean`], but picks a constructor whose arity
  /// matches `args`. On a cache hit `args` are ignored.
  fn get_bean_with_args(&self, name: &str, args: &[Value]) -> Result<SharedBean>;

  /// Returns the bean named `name` downcast to `T`.
  ///
  /// A bean of another type is still created and cached; only the
  /// downcast fails.
  fn get_bean_typed<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>>
  where
    Self: Sized,
  {
    downcast_bean(name, self.get_bean(name)?)
  }

  fn get_bean_typed_with_args<T: Any + Send + Sync>(
    &self,
    name: &str,
    args: &[Value],
  ) -> Result<Arc<T>>
  where
    Self: Sized,
  {
    downcast_bean(name, self.get_bean_with_args(name, args)?)
  }
}

fn downcast_bean<T: Any + Send + Sync>(name: &str, bean: SharedBean) -> Result<Arc<T>> {
  bean
    .downcast::<T>()
    .map_err(|_| BeansError::BeanNotOfRequiredType {
      name: name.to_owned(),
      required: type_name::<T>(),
    })
}

/// A bean factory that is also its own definition registry.
///
/// Each factory owns an isolated definition map and singleton cache, so
/// separate factories never see each other's beans.
///
/// Lookups and registrations take `&self` and may run from several threads.
/// Two threads asking for the same uncached bean may both build it; the
/// cache keeps whichever finishes last.
pub struct DefaultListableBeanFactory {
  id: u64,
  singletons: DefaultSingletonBeanRegistry,
  bean_definition_map: DashMap<String, Arc<BeanDefinition>>,
  instantiation_strategy: InstantiationStrategy,
}

impl Default for DefaultListableBeanFactory {
  fn default() -> Self {
    Self::with_strategy(InstantiationStrategy::default())
  }
}

impl DefaultListableBeanFactory {
  /// Creates a new, empty factory using the proxy-generating strategy.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_strategy(instantiation_strategy: InstantiationStrategy) -> Self {
    Self {
      id: next_factory_id(),
      singletons: DefaultSingletonBeanRegistry::new(),
      bean_definition_map: DashMap::new(),
      instantiation_strategy,
    }
  }

  pub fn with_config(config: &FactoryConfig) -> Self {
    Self::with_strategy(config.strategy.into())
  }

  // --- PRIVATE HELPERS ---

  fn do_get_bean(&self, name: &str, args: Option<&[Value]>) -> Result<SharedBean> {
    if let Some(bean) = self.singletons.get_singleton(name) {
      trace!(bean = %name, "Returning cached instance of singleton bean");
      return Ok(bean);
    }

    let bean_definition = self.get_bean_definition(name)?;
    self.create_bean(name, &bean_definition, args)
  }

  fn create_bean(
    &self,
    name: &str,
    bean_definition: &BeanDefinition,
    args: Option<&[Value]>,
  ) -> Result<SharedBean> {
    // Held until the bean is cached or the attempt fails.
    let _guard = CreationGuard::enter(self.id, name)?;

    debug!(
      bean = %name,
      type_name = bean_definition.bean_class().type_name(),
      "Creating instance of bean"
    );
    let mut bean = self.create_bean_instance(bean_definition, name, args)?;
    self.apply_property_values(name, &mut bean, bean_definition)?;

    let bean: SharedBean = Arc::from(bean);
    self.singletons.add_singleton(name, bean.clone());
    debug!(bean = %name, "Finished creating instance of bean");
    Ok(bean)
  }

  fn create_bean_instance(
    &self,
    bean_definition: &BeanDefinition,
    name: &str,
    args: Option<&[Value]>,
  ) -> Result<BeanBox> {
    let bean_class = bean_definition.bean_class();
    let instantiation_error = |source: InstantiationError| BeansError::Instantiation {
      bean_name: name.to_owned(),
      type_name: bean_class.type_name(),
      source,
    };

    let constructor_to_use = match args {
      Some(args) => {
        let ctor = bean_class
          .find_constructor(args.len())
          .ok_or(InstantiationError::NoMatchingConstructor { arity: args.len() })
          .map_err(instantiation_error)?;
        Some(ctor)
      }
      None => None,
    };

    self
      .instantiation_strategy
      .instantiate(bean_definition, name, constructor_to_use, args)
      .map_err(instantiation_error)
  }

  fn apply_property_values(
    &self,
    name: &str,
    bean: &mut BeanBox,
    bean_definition: &BeanDefinition,
  ) -> Result<()> {
    let bean_class = bean_definition.bean_class();
    for property_value in bean_definition.property_values() {
      let property = property_value.name();
      let assignment_error = |source: PropertyError| BeansError::PropertyAssignment {
        bean_name: name.to_owned(),
        property: property.to_owned(),
        source,
      };

      let value = match property_value.value() {
        ValueSource::Literal(value) => value.clone(),
        ValueSource::Reference(reference) => {
          trace!(
            bean = %name,
            property,
            reference = reference.bean_name(),
            "Resolving bean reference"
          );
          let dependency = self
            .get_bean(reference.bean_name())
            .map_err(|e| assignment_error(PropertyError::Resolution(Box::new(e))))?;
          Value::Bean(dependency)
        }
      };

      trace!(bean = %name, property, "Assigning property value");
      bean_class
        .set_field(bean.as_mut(), property, value)
        .map_err(assignment_error)?;
    }
    Ok(())
  }

  // --- PUBLIC API ---

  /// Fetches the definition registered under `name`.
  pub fn get_bean_definition(&self, name: &str) -> Result<Arc<BeanDefinition>> {
    self
      .bean_definition_map
      .get(name)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| BeansError::DefinitionNotFound(name.to_owned()))
  }

  /// Registered definition names, sorted.
  pub fn bean_definition_names(&self) -> Vec<String> {
    let mut names: Vec<String> = self
      .bean_definition_map
      .iter()
      .map(|entry| entry.key().clone())
      .collect();
    names.sort_unstable();
    names
  }

  pub fn bean_definition_count(&self) -> usize {
    self.bean_definition_map.len()
  }

  pub fn singleton_count(&self) -> usize {
    self.singletons.singleton_count()
  }

  pub fn instantiation_strategy(&self) -> &InstantiationStrategy {
    &self.instantiation_strategy
  }

  pub fn set_instantiation_strategy(&mut self, instantiation_strategy: InstantiationStrategy) {
    self.instantiation_strategy = instantiation_strategy;
  }
}

impl BeanFactory for DefaultListableBeanFactory {
  fn get_bean(&self, name: &str) -> Result<SharedBean> {
    self.do_get_bean(name, None)
  }

  fn get_bean_with_args(&self, name: &str, args: &[Value]) -> Result<SharedBean> {
    self.do_get_bean(name, Some(args))
  }
}

impl BeanDefinitionRegistry for DefaultListableBeanFactory {
  fn register_bean_definition(&self, bean_name: &str, bean_definition: BeanDefinition) {
    let type_name = bean_definition.bean_class().type_name();
    let previous = self
      .bean_definition_map
      .insert(bean_name.to_owned(), Arc::new(bean_definition));
    match previous {
      Some(_) => debug!(bean = %bean_name, type_name, "Overriding bean definition"),
      None => debug!(bean = %bean_name, type_name, "Registered bean definition"),
    }
  }

  fn contains_bean_definition(&self, bean_name: &str) -> bool {
    self.bean_definition_map.contains_key(bean_name)
  }
}

impl SingletonBeanRegistry for DefaultListableBeanFactory {
  fn get_singleton(&self, bean_name: &str) -> Option<SharedBean> {
    self.singletons.get_singleton(bean_name)
  }
}
