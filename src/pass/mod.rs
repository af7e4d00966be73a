//! Password generation: charsets, policies, synthesis, and analysis.

pub mod apikey;
pub mod charset;
pub mod generate;
pub mod policy;
pub mod strength;
pub mod template;

pub use apikey::ApiKeyFormat;
pub use charset::PasswordClass;
pub use generate::{GenerateRequest, generate_batch};
pub use policy::PolicyConstraint;
