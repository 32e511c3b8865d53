//! Minimal provider abstraction over the OpenAI, Claude and Gemini chat APIs.

pub mod config;
pub mod credential;
pub mod error;
pub mod factory;
pub mod http;
pub mod provider;
pub mod types;

pub use config::ProviderConfig;
pub use error::{ConfigError, LLMError};
pub use factory::{ProviderKind, create_provider, create_provider_with_transport};
pub use provider::{DynProvider, LLMProvider, ProviderBinding};
pub use types::*;
