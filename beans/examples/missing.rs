use fibre_beans::{
  BeanClass, BeanDefinition, BeanDefinitionRegistry, BeanFactory, BeanReference,
  DefaultListableBeanFactory, PropertyValues,
};
use std::error::Error;
use std::sync::Arc;

struct Repository;

struct Controller {
  repository: Option<Arc<Repository>>,
}

fn print_chain(err: &dyn Error) {
  println!("error: {}", err);
  let mut cause = err.source();
  while let Some(inner) = cause {
    println!("  caused by: {}", inner);
    cause = inner.source();
  }
}

fn main() {
  let factory = DefaultListableBeanFactory::new();

  let controller = BeanClass::builder::<Controller>()
    .constructor(0, |_| Ok(Controller { repository: None }))
    .field("repository", |c: &mut Controller, v: Arc<Repository>| {
      c.repository = Some(v)
    })
    .build();
  factory.register_bean_definition(
    "controller",
    BeanDefinition::with_property_values(
      controller,
      PropertyValues::new().with("repository", BeanReference::new("repository")),
    ),
  );

  // "repository" was never registered.
  let err = factory.get_bean("controller").unwrap_err();
  print_chain(&err);
  println!("root cause: {}", err.root_cause());

  // Register it and try again: nothing was cached by the failed attempt.
  factory.register_bean_definition(
    "repository",
    BeanDefinition::new(BeanClass::builder::<Repository>().constructor(0, |_| Ok(Repository)).build()),
  );
  let controller = factory
    .get_bean_typed::<Controller>("controller")
    .expect("controller should now resolve");
  assert!(controller.repository.is_some());
  println!("controller resolved after registering its repository");
}
