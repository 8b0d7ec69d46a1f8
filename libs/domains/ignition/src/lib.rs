//! Ignition Domain
//!
//! Factory ignition checks for the demo car. Each engine configuration key
//! (`aspirated`, `electric`, `turbo`) maps to a parameter set in the
//! [`EngineCatalog`]; a test fits that engine into a Honda HR-V and tries to
//! start it with the supplied key.
//!
//! ```rust,no_run
//! use domain_ignition::{handlers, EngineCatalog, IgnitionService};
//!
//! let router = handlers::router(IgnitionService::new(EngineCatalog::factory_defaults()));
//! ```

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use catalog::EngineCatalog;
pub use error::{IgnitionError, IgnitionResult};
pub use handlers::ApiDoc;
pub use models::{
    Car, Engine, EngineKind, EngineListing, EngineModel, EngineVariant, IgnitionReport,
    IgnitionStatus, Key, KeyKind, Manufacturer, ignite,
};
pub use service::IgnitionService;
