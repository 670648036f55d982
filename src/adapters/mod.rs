// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod resend;

pub use resend::{ResendClient, DEFAULT_API_ENDPOINT};
