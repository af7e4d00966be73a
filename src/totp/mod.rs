//! Time-based one-time passwords and their provisioning URIs.

pub mod code;
pub mod uri;

pub use code::{Algorithm, TotpCode, TotpParams, current_and_next};
pub use uri::{TotpUri, build_otpauth_uri, parse_otpauth_uri};
