//! Instantiation strategies: turning a definition into a raw, unpopulated bean.

use crate::class::Constructor;
use crate::definition::BeanDefinition;
use crate::error::{BoxError, InstantiationError};
use crate::value::{BeanBox, Value};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

static NO_OP: Lazy<Arc<dyn ConstructionCallback>> = Lazy::new(|| Arc::new(NoOp));

/// A pending constructor call handed to a [`ConstructionCallback`].
pub struct Invocation<'a> {
  bean_name: &'a str,
  constructor: &'a Constructor,
  args: &'a [Value],
}

impl<'a> Invocation<'a> {
  pub fn bean_name(&self) -> &str {
    self.bean_name
  }

  pub fn constructor(&self) -> &Constructor {
    self.constructor
  }

  pub fn args(&self) -> &[Value] {
    self.args
  }

  /// Runs the underlying constructor.
  pub fn proceed(self) -> Result<BeanBox, BoxError> {
    self.constructor.invoke(self.args)
  }
}

/// Hook wrapped around every constructor call made by the proxy-generating
/// strategy. Implementations must return an instance of the constructor's type.
pub trait ConstructionCallback: Send + Sync {
  fn intercept(&self, invocation: Invocation<'_>) -> Result<BeanBox, BoxError>;
}

/// Callback that adds no behaviour.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOp;

impl ConstructionCallback for NoOp {
  fn intercept(&self, invocation: Invocation<'_>) -> Result<BeanBox, BoxError> {
    invocation.proceed()
  }
}

/// How a factory constructs raw bean instances.
///
/// Both variants produce an instance of exactly the bean's type, so beans
/// built by either are indistinguishable once populated.
#[derive(Clone)]
pub enum InstantiationStrategy {
  /// Calls the type's own constructor of the chosen arity.
  Direct,
  /// Calls the chosen constructor through a [`ConstructionCallback`].
  ProxyGenerating(Arc<dyn ConstructionCallback>),
}

impl Default for InstantiationStrategy {
  fn default() -> Self {
    InstantiationStrategy::ProxyGenerating(NO_OP.clone())
  }
}

impl fmt::Debug for InstantiationStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InstantiationStrategy::Direct => write!(f, "Direct"),
      InstantiationStrategy::ProxyGenerating(_) => write!(f, "ProxyGenerating(..)"),
    }
  }
}

impl InstantiationStrategy {
  pub fn direct() -> Self {
    InstantiationStrategy::Direct
  }

  pub fn proxy_generating(callback: impl ConstructionCallback + 'static) -> Self {
    InstantiationStrategy::ProxyGenerating(Arc::new(callback))
  }

  pub fn kind(&self) -> StrategyKind {
    match self {
      InstantiationStrategy::Direct => StrategyKind::Direct,
      InstantiationStrategy::ProxyGenerating(_) => StrategyKind::ProxyGenerating,
    }
  }

  /// Produces a raw instance for `definition`.
  ///
  /// `ctor` is the constructor chosen by the factory, or `None` to use the
  /// zero-argument constructor. `args` are passed through unchanged.
  pub fn instantiate(
    &self,
    definition: &BeanDefinition,
    bean_name: &str,
    ctor: Option<&Constructor>,
    args: Option<&[Value]>,
  ) -> Result<BeanBox, InstantiationError> {
    let class = definition.bean_class();
    let args = args.unwrap_or(&[]);
    let wanted = ctor.map_or(0, Constructor::arity);

    let constructor = match self {
      // Resolve again against the type itself rather than trusting the handle.
      InstantiationStrategy::Direct => class.find_constructor(wanted),
      InstantiationStrategy::ProxyGenerating(_) => ctor.or_else(|| class.find_constructor(0)),
    };
    let constructor = match constructor {
      Some(c) => c,
      None if ctor.is_none() => return Err(InstantiationError::NoDefaultConstructor),
      None => return Err(InstantiationError::NoMatchingConstructor { arity: wanted }),
    };

    let built = match self {
      InstantiationStrategy::Direct => constructor.invoke(args),
      InstantiationStrategy::ProxyGenerating(callback) => callback.intercept(Invocation {
        bean_name,
        constructor,
        args,
      }),
    };
    let bean = built.map_err(InstantiationError::ConstructorFailed)?;

    // A callback may hand back anything; the bean must still be the class's type.
    if (*bean).type_id() != class.type_id() {
      return Err(InstantiationError::UnexpectedType {
        expected: class.type_name(),
      });
    }
    Ok(bean)
  }
}

/// Serializable selector for [`InstantiationStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
  Direct,
  #[default]
  ProxyGenerating,
}

impl From<StrategyKind> for InstantiationStrategy {
  fn from(kind: StrategyKind) -> Self {
    match kind {
      StrategyKind::Direct => InstantiationStrategy::Direct,
      StrategyKind::ProxyGenerating => InstantiationStrategy::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::class::BeanClass;
  use std::sync::atomic::{AtomicUsize, Ordering};

  #[derive(Default)]
  struct Point {
    x: i64,
    y: i64,
  }

  fn point_definition() -> BeanDefinition {
    BeanDefinition::new(
      BeanClass::builder::<Point>()
        .default_constructor()
        .constructor(2, |args| {
          Ok(Point {
            x: args.get(0)?,
            y: args.get(1)?,
          })
        })
        .build(),
    )
  }

  struct Counting(AtomicUsize);

  impl ConstructionCallback for Counting {
    fn intercept(&self, invocation: Invocation<'_>) -> Result<BeanBox, BoxError> {
      self.0.fetch_add(1, Ordering::SeqCst);
      invocation.proceed()
    }
  }

  #[test]
  fn both_variants_build_the_same_type() {
    let def = point_definition();
    let ctor = def.bean_class().find_constructor(2).cloned();
    let args = [Value::from(3), Value::from(4)];

    for strategy in [InstantiationStrategy::direct(), InstantiationStrategy::default()] {
      let raw = strategy
        .instantiate(&def, "point", ctor.as_ref(), Some(&args))
        .unwrap();
      let point = raw.downcast::<Point>().unwrap();
      assert_eq!((point.x, point.y), (3, 4));
    }
  }

  #[test]
  fn missing_default_constructor_is_reported() {
    let def = BeanDefinition::new(
      BeanClass::builder::<Point>()
        .constructor(2, |_| Ok(Point::default()))
        .build(),
    );
    for strategy in [InstantiationStrategy::direct(), InstantiationStrategy::default()] {
      assert!(matches!(
        strategy.instantiate(&def, "point", None, None),
        Err(InstantiationError::NoDefaultConstructor)
      ));
    }
  }

  #[test]
  fn proxy_generating_runs_the_callback() {
    let counting = Arc::new(Counting(AtomicUsize::new(0)));
    let strategy = InstantiationStrategy::ProxyGenerating(counting.clone());
    let def = point_definition();

    strategy.instantiate(&def, "point", None, None).unwrap();
    strategy.instantiate(&def, "point", None, None).unwrap();

    assert_eq!(counting.0.load(Ordering::SeqCst), 2);
    assert_eq!(strategy.kind(), StrategyKind::ProxyGenerating);
  }

  struct Swap;

  impl ConstructionCallback for Swap {
    fn intercept(&self, _invocation: Invocation<'_>) -> Result<BeanBox, BoxError> {
      Ok(Box::new(String::from("not a point")))
    }
  }

  #[test]
  fn proxy_generating_rejects_instances_of_another_type() {
    let strategy = InstantiationStrategy::proxy_generating(Swap);
    let def = point_definition();

    let err = strategy.instantiate(&def, "point", None, None).unwrap_err();

    assert!(matches!(
      err,
      InstantiationError::UnexpectedType { expected } if expected == def.bean_class().type_name()
    ));
  }

  #[test]
  fn constructor_failures_are_wrapped() {
    let def = BeanDefinition::new(
      BeanClass::builder::<Point>()
        .constructor(0, |_| Err("boom".into()))
        .build(),
    );
    let err = InstantiationStrategy::direct()
      .instantiate(&def, "point", None, None)
      .unwrap_err();
    assert!(matches!(err, InstantiationError::ConstructorFailed(_)));
    assert_eq!(err.to_string(), "Constructor threw: boom");
  }
}
