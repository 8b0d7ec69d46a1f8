use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use crate::catalog::EngineCatalog;
use crate::error::{IgnitionError, IgnitionResult};
use crate::models::{Car, EngineListing, EngineVariant, IgnitionStatus, Key};

/// Runs factory ignition tests against the engines in an [`EngineCatalog`].
#[derive(Debug, Clone)]
pub struct IgnitionService {
    catalog: Arc<EngineCatalog>,
}

impl IgnitionService {
    pub fn new(catalog: EngineCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// `variant` is the raw configuration key, e.g. `"turbo"`.
    #[instrument(skip(self, key))]
    pub fn start_car(&self, variant: &str, key: Key) -> IgnitionResult<IgnitionStatus> {
        let engine = EngineVariant::from_str(variant)
            .ok()
            .and_then(|v| self.catalog.get(v))
            .ok_or_else(|| IgnitionError::UnknownEngine(variant.to_string()))?;

        tracing::info!(
            manufacturer = %key.manufacturer,
            key_kind = %key.kind,
            "Starting ignition test"
        );
        tracing::debug!(engine = ?engine, "Resolved engine");

        let car = Car::honda_hrv(engine.clone());
        let status = car.ignite(&key);

        tracing::info!(%status, car = %car.model, "Ignition test finished");
        Ok(status)
    }

    pub fn engines(&self) -> Vec<EngineListing> {
        self.catalog.listings()
    }
}

impl Default for IgnitionService {
    fn default() -> Self {
        Self::new(EngineCatalog::factory_defaults())
    }
}
