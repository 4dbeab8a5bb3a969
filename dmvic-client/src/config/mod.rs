pub mod builder;
pub mod loader;
pub mod settings;
pub mod templates;
pub mod types;
pub mod validator;

pub use builder::DmvicConfigBuilder;
pub use loader::{ConfigLoader, DefaultConfigLoader};
pub use settings::{keys, StaticSettings};
pub use templates::{ensure_config_file_exists, generate_default_config_template};
pub use types::{AuthConfig, CoverageGapPolicy, DmvicConfig, EndpointPaths};
pub use validator::ConfigValidatorImpl;
