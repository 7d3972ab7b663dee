use fibre_beans::{
  BeanClass, BeanDefinition, BeanDefinitionRegistry, BeanFactory, BeanReference,
  DefaultListableBeanFactory, PropertyValue, PropertyValues,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// --- Beans ---
struct UserDao {
  users: HashMap<&'static str, &'static str>,
}

impl UserDao {
  fn new() -> Self {
    let users = HashMap::from([("10001", "Tom"), ("10002", "Jenny"), ("10003", "Jack")]);
    Self { users }
  }

  fn query_user_name(&self, u_id: &str) -> &'static str {
    self.users.get(u_id).copied().unwrap_or("<unknown>")
  }
}

#[derive(Default)]
struct UserService {
  u_id: String,
  user_dao: Option<Arc<UserDao>>,
}

impl UserService {
  fn query_user_info(&self) -> String {
    match &self.user_dao {
      Some(dao) => format!("query the user info: {}", dao.query_user_name(&self.u_id)),
      None => "no user dao injected".to_string(),
    }
  }
}

fn main() {
  // RUST_LOG=fibre_beans=trace shows every resolution step.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let factory = DefaultListableBeanFactory::new();

  // --- Registration ---
  factory.register_bean_definition(
    "userDao",
    BeanDefinition::new(
      BeanClass::builder::<UserDao>()
        .constructor(0, |_| Ok(UserDao::new()))
        .build(),
    ),
  );

  let mut property_values = PropertyValues::new();
  property_values.add_property_value(PropertyValue::new("uId", "10001"));
  property_values.add_property_value(PropertyValue::new("userDao", BeanReference::new("userDao")));
  let user_service = BeanClass::builder::<UserService>()
    .default_constructor()
    .field("uId", |s: &mut UserService, v: String| s.u_id = v)
    .field("userDao", |s: &mut UserService, v: Arc<UserDao>| s.user_dao = Some(v))
    .build();
  factory.register_bean_definition(
    "userService",
    BeanDefinition::with_property_values(user_service, property_values),
  );

  // --- Resolution ---
  let service = factory
    .get_bean_typed::<UserService>("userService")
    .expect("userService should be wired");
  let info = service.query_user_info();
  println!("{}", info);

  assert_eq!(info, "query the user info: Tom");
}
