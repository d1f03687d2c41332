//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::TranscoderService;
use crate::config::Settings;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Domain transcoder bound to the effective processing options
    pub transcoder: TranscoderService,
}

impl ServiceContainer {
    /// Create a container using the processing options from settings.
    ///
    /// Command line flags are folded into `settings.idna` beforehand.
    pub fn new(settings: Settings) -> Self {
        Self {
            transcoder: TranscoderService::new(settings.idna),
            settings: Arc::new(settings),
        }
    }
}
