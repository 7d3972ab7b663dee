// beans/tests/macros.rs

//! Tests specifically for the public macros.
//! This file verifies the behavior of:
//! - `property_values!`
//! - `get_bean!`

use fibre_beans::{
  get_bean, property_values, BeanClass, BeanDefinition, BeanDefinitionRegistry, BeanReference,
  DefaultListableBeanFactory, Value, ValueSource,
};
use std::sync::Arc;

// --- Test Fixtures ---

#[derive(Default)]
struct Clock;

#[derive(Default)]
struct Scheduler {
  name: String,
  workers: i64,
  clock: Option<Arc<Clock>>,
}

fn factory() -> DefaultListableBeanFactory {
  let factory = DefaultListableBeanFactory::new();
  factory.register_bean_definition(
    "clock",
    BeanDefinition::new(BeanClass::builder::<Clock>().default_constructor().build()),
  );
  let scheduler = BeanClass::builder::<Scheduler>()
    .default_constructor()
    .constructor(2, |args| {
      Ok(Scheduler {
        name: args.get(0)?,
        workers: args.get(1)?,
        clock: None,
      })
    })
    .field("name", |s: &mut Scheduler, v: String| s.name = v)
    .field("workers", |s: &mut Scheduler, v: i64| s.workers = v)
    .field("clock", |s: &mut Scheduler, v: Arc<Clock>| s.clock = Some(v))
    .build();
  factory.register_bean_definition(
    "scheduler",
    BeanDefinition::with_property_values(
      Arc::new(scheduler),
      property_values! {
        "name" => "nightly",
        "workers" => 4,
        "clock" => ref "clock",
      },
    ),
  );
  factory
}

// --- property_values! Tests ---

#[test]
fn test_property_values_mixes_literals_and_references() {
  let pvs = property_values! {
    "name" => "nightly",
    "workers" => 4,
    "clock" => ref "clock"
  };

  let values: Vec<&ValueSource> = pvs.iter().map(|pv| pv.value()).collect();
  assert_eq!(values[0], &ValueSource::Literal(Value::from("nightly")));
  assert_eq!(values[1], &ValueSource::Literal(Value::Int(4)));
  assert_eq!(values[2], &ValueSource::Reference(BeanReference::new("clock")));
}

#[test]
fn test_property_values_empty() {
  let pvs = property_values! {};
  assert!(pvs.is_empty());
}

// --- get_bean! Tests ---

#[test]
fn test_get_bean_resolves_typed_bean() {
  let factory = factory();

  let scheduler = get_bean!(factory, Scheduler, "scheduler");
  let clock = get_bean!(&factory, Clock, "clock");

  assert_eq!(scheduler.name, "nightly");
  assert_eq!(scheduler.workers, 4);
  assert!(Arc::ptr_eq(scheduler.clock.as_ref().unwrap(), &clock));
}

#[test]
fn test_get_bean_with_constructor_args() {
  let factory = factory();

  // Properties are applied after the two-arg constructor runs.
  let scheduler = get_bean!(factory, Scheduler, "scheduler", "hourly", 2);

  assert_eq!(scheduler.name, "nightly");
  assert_eq!(scheduler.workers, 4);
}

#[test]
#[should_panic(expected = "Failed to get required bean 'missing'")]
fn test_get_bean_panics_on_missing_bean() {
  let factory = factory();
  get_bean!(factory, Scheduler, "missing");
}

#[test]
#[should_panic(expected = "is not of required type")]
fn test_get_bean_panics_on_wrong_type() {
  let factory = factory();
  get_bean!(factory, Clock, "scheduler");
}
