use domain::SupabaseService;
use service::config::Config;
use std::sync::Arc;

pub(crate) mod controller;
pub mod error;
pub(crate) mod middleware;
pub(crate) mod params;
pub mod router;

pub use error::{Error, Result};
pub use router::define_routes;

// Web-level state shared by every handler. Needs to implement Clone to be
// able to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    supabase: Arc<SupabaseService>,
}

impl AppState {
    pub fn new(config: Config, supabase: &Arc<SupabaseService>) -> Self {
        Self {
            config,
            supabase: Arc::clone(supabase),
        }
    }

    pub fn supabase_ref(&self) -> &SupabaseService {
        self.supabase.as_ref()
    }
}
