//! Clients for external services the gateway talks to.

pub mod supabase;
