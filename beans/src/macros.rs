//! Public macros for building property values and fetching typed beans.

/// Builds a [`PropertyValues`](crate::PropertyValues) from `name => value` pairs.
///
/// A value written as `ref "name"` becomes a
/// [`BeanReference`](crate::BeanReference); anything else is a literal.
///
/// ```
/// use fibre_beans::property_values;
///
/// let pvs = property_values! {
///   "uId" => "10001",
///   "userDao" => ref "userDao",
/// };
/// assert_eq!(pvs.len(), 2);
/// assert!(pvs.get_property_value("userDao").unwrap().value().is_reference());
/// ```
#[macro_export]
macro_rules! property_values {
  (@acc $pvs:ident;) => {};

  // A reference to another bean: "field" => ref "bean"
  (@acc $pvs:ident; $name:expr => ref $target:expr $(, $($rest:tt)*)?) => {
    $pvs.add_property_value($crate::PropertyValue::new(
      $name,
      $crate::BeanReference::new($target),
    ));
    $crate::property_values!(@acc $pvs; $($($rest)*)?);
  };

  // A literal: "field" => value
  (@acc $pvs:ident; $name:expr => $value:expr $(, $($rest:tt)*)?) => {
    $pvs.add_property_value($crate::PropertyValue::new($name, $value));
    $crate::property_values!(@acc $pvs; $($($rest)*)?);
  };

  ($($body:tt)*) => {{
    #[allow(unused_mut)]
    let mut pvs = $crate::PropertyValues::new();
    $crate::property_values!(@acc pvs; $($body)*);
    pvs
  }};
}

/// Fetches a bean by name and downcasts it, panicking on any failure.
///
/// For a non-panicking version, use `BeanFactory::get_bean_typed` directly.
///
/// # Panics
///
/// Panics if the bean cannot be created or is not of the requested type.
///
/// ```
/// use fibre_beans::{get_bean, BeanClass, BeanDefinition, BeanDefinitionRegistry, DefaultListableBeanFactory};
///
/// let factory = DefaultListableBeanFactory::new();
/// factory.register_bean_definition(
///   "greeting",
///   BeanDefinition::new(BeanClass::builder::<String>().default_constructor().build()),
/// );
///
/// let greeting = get_bean!(factory, String, "greeting");
/// assert!(greeting.is_empty());
/// ```
#[macro_export]
macro_rules! get_bean {
  ($factory:expr, $type:ty, $name:expr) => {{
    use $crate::BeanFactory as _;
    ($factory)
      .get_bean_typed::<$type>($name)
      .unwrap_or_else(|e| panic!("Failed to get required bean '{}': {}", $name, e))
  }};

  ($factory:expr, $type:ty, $name:expr, $($arg:expr),+ $(,)?) => {{
    use $crate::BeanFactory as _;
    ($factory)
      .get_bean_typed_with_args::<$type>($name, &[$($crate::Value::from($arg)),+])
      .unwrap_or_else(|e| panic!("Failed to get required bean '{}': {}", $name, e))
  }};
}
