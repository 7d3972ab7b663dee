//! # Fibre Beans
//!
//! A small bean factory for Rust: register named blueprints of your types,
//! then ask for beans by name and get back fully wired singletons.
//!
//! ## Core Concepts
//!
//! - **BeanClass**: describes a type: its constructors (selected by arity)
//!   and the fields that can be written by name.
//! - **BeanDefinition**: a `BeanClass` plus the `PropertyValues` to inject.
//! - **BeanReference**: a property value meaning "inject the bean with this
//!   name here", resolved recursively when the owning bean is created.
//! - **DefaultListableBeanFactory**: holds the definitions and the singleton
//!   cache, and creates beans on first request.
//! - **InstantiationStrategy**: how raw instances are built, either `Direct`
//!   or `ProxyGenerating` through a `ConstructionCallback`.
//!
//! A bean is cached only after construction and population both succeed.
//! Reference cycles are reported as `BeansError::CircularDependency`.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_beans::{
//!   property_values, BeanClass, BeanDefinition, BeanDefinitionRegistry, BeanFactory,
//!   DefaultListableBeanFactory,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct UserDao;
//!
//! impl UserDao {
//!   fn query_user_name(&self, u_id: &str) -> Option<&'static str> {
//!     (u_id == "10001").then_some("Tom")
//!   }
//! }
//!
//! #[derive(Default)]
//! struct UserService {
//!   u_id: String,
//!   user_dao: Option<Arc<UserDao>>,
//! }
//!
//! let factory = DefaultListableBeanFactory::new();
//!
//! factory.register_bean_definition(
//!   "userDao",
//!   BeanDefinition::new(BeanClass::builder::<UserDao>().default_constructor().build()),
//! );
//!
//! let user_service = BeanClass::builder::<UserService>()
//!   .default_constructor()
//!   .field("uId", |s: &mut UserService, v: String| s.u_id = v)
//!   .field("userDao", |s: &mut UserService, v: Arc<UserDao>| s.user_dao = Some(v))
//!   .build();
//! factory.register_bean_definition(
//!   "userService",
//!   BeanDefinition::with_property_values(
//!     user_service,
//!     property_values! { "uId" => "10001", "userDao" => ref "userDao" },
//!   ),
//! );
//!
//! let service = factory.get_bean_typed::<UserService>("userService").unwrap();
//! let dao = service.user_dao.as_ref().unwrap();
//! assert_eq!(dao.query_user_name(&service.u_id), Some("Tom"));
//! ```

mod class;
mod config;
mod core;
mod definition;
mod error;
mod factory;
mod macros;
mod property;
mod registry;
mod strategy;
mod value;

pub use class::{BeanClass, BeanClassBuilder, Constructor};
pub use config::FactoryConfig;
pub use definition::BeanDefinition;
pub use error::{BeansError, BoxError, ConfigError, InstantiationError, PropertyError, Result};
pub use factory::{BeanFactory, DefaultListableBeanFactory};
pub use property::{BeanReference, PropertyValue, PropertyValues, ValueSource};
pub use registry::{BeanDefinitionRegistry, DefaultSingletonBeanRegistry, SingletonBeanRegistry};
pub use strategy::{ConstructionCallback, InstantiationStrategy, Invocation, NoOp, StrategyKind};
pub use value::{Args, BeanBox, FromValue, SharedBean, Value};
