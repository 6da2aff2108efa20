//! Identity service client.

mod http;

pub use http::{HttpIdentityVerifier, VerifierConfig};
