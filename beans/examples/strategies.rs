use fibre_beans::{
  get_bean, property_values, BeanBox, BeanClass, BeanDefinition, BeanDefinitionRegistry,
  BoxError, ConstructionCallback, DefaultListableBeanFactory, FactoryConfig,
  InstantiationStrategy, Invocation,
};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct MailSender {
  host: String,
  port: u32,
}

fn mail_sender_definition() -> BeanDefinition {
  let class = BeanClass::builder::<MailSender>()
    .default_constructor()
    .constructor(2, |args| {
      Ok(MailSender {
        host: args.get(0)?,
        port: args.get(1)?,
      })
    })
    .field("host", |m: &mut MailSender, v: String| m.host = v)
    .field("port", |m: &mut MailSender, v: u32| m.port = v)
    .build();
  BeanDefinition::with_property_values(class, property_values! { "port" => 2525 })
}

// A callback that reports every constructor call it proxies.
struct Announce;

impl ConstructionCallback for Announce {
  fn intercept(&self, invocation: Invocation<'_>) -> Result<BeanBox, BoxError> {
    println!(
      "constructing '{}' with {} argument(s)",
      invocation.bean_name(),
      invocation.args().len()
    );
    invocation.proceed()
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  // Strategy picked from configuration.
  let config = FactoryConfig::from_yaml_str("strategy: direct").expect("valid config");
  let direct = DefaultListableBeanFactory::with_config(&config);
  direct.register_bean_definition("mailSender", mail_sender_definition());

  // Strategy picked in code.
  let proxied = DefaultListableBeanFactory::with_strategy(InstantiationStrategy::proxy_generating(Announce));
  proxied.register_bean_definition("mailSender", mail_sender_definition());

  let a = get_bean!(direct, MailSender, "mailSender", "smtp.local", 25);
  let b = get_bean!(proxied, MailSender, "mailSender", "smtp.local", 25);

  println!("direct:  {}:{}", a.host, a.port);
  println!("proxied: {}:{}", b.host, b.port);

  // Properties run after the constructor, so the port is overridden in both.
  assert_eq!((a.host.as_str(), a.port), (b.host.as_str(), b.port));
  assert_eq!(a.port, 2525);
}
