//! Domain logic for the auth gateway: provider availability, auth backend
//! status, OAuth entrypoint URLs and the Supabase service wrapper. The `web`
//! layer depends on this crate and never on the gateway clients directly.

pub mod error;
pub mod gateway;
pub mod oauth;
pub mod provider;
pub mod status;
pub mod supabase;

pub use provider::{AvailableProviders, Provider};
pub use status::AuthStatus;
pub use supabase::{SupabaseProjectConfig, SupabaseProviders, SupabaseService};
