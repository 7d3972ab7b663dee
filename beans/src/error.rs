//! Error types for bean lookup, instantiation and property population.

use thiserror::Error;

/// A boxed, thread-safe error used as the cause of a failed constructor body.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the `fibre_beans` library.
#[derive(Debug, Error)]
pub enum BeansError {
  #[error("No bean named '{0}' is defined")]
  DefinitionNotFound(String),

  #[error("Failed to instantiate [{type_name}] for bean '{bean_name}'")]
  Instantiation {
    bean_name: String,
    type_name: &'static str,
    #[source]
    source: InstantiationError,
  },

  #[error("Error setting property '{property}' for bean '{bean_name}'")]
  PropertyAssignment {
    bean_name: String,
    property: String,
    #[source]
    source: PropertyError,
  },

  #[error("Circular dependency detected while creating bean '{0}'")]
  CircularDependency(String),

  #[error("Bean named '{name}' is not of required type [{required}]")]
  BeanNotOfRequiredType { name: String, required: &'static str },
}

impl BeansError {
  /// Walks nested property failures down to the innermost engine error.
  ///
  /// Reference resolution wraps every nested failure once per level, so a
  /// missing definition three beans deep surfaces as three nested
  /// `PropertyAssignment` errors around a `DefinitionNotFound`.
  pub fn root_cause(&self) -> &BeansError {
    let mut current = self;
    while let BeansError::PropertyAssignment {
      source: PropertyError::Resolution(inner),
      ..
    } = current
    {
      current = &**inner;
    }
    current
  }
}

/// Why a construction strategy could not produce a raw instance.
#[derive(Debug, Error)]
pub enum InstantiationError {
  #[error("No default (zero-argument) constructor declared")]
  NoDefaultConstructor,

  #[error("No constructor declared with {arity} parameter(s)")]
  NoMatchingConstructor { arity: usize },

  #[error("Constructor threw: {0}")]
  ConstructorFailed(#[source] BoxError),

  #[error("Construction produced an instance that is not a [{expected}]")]
  UnexpectedType { expected: &'static str },
}

/// Why a single property could not be resolved or assigned.
#[derive(Debug, Error)]
pub enum PropertyError {
  #[error("Type [{type_name}] has no writable field '{field}'")]
  NoSuchField { type_name: &'static str, field: String },

  #[error("Cannot assign a {found} value to field of type [{expected}]")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },

  #[error("Failed to resolve referenced bean")]
  Resolution(#[source] Box<BeansError>),
}

/// Raised when a `FactoryConfig` cannot be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to parse YAML configuration: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Failed to parse JSON configuration: {0}")]
  Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for `fibre_beans` operations.
pub type Result<T, E = BeansError> = std::result::Result<T, E>;
