//! Engine parameters keyed by configuration variant.

use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use crate::models::{Engine, EngineKind, EngineListing, EngineModel, EngineVariant};

/// Lookup table built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineCatalog {
    engines: BTreeMap<EngineVariant, Engine>,
    primary: EngineVariant,
}

impl EngineCatalog {
    pub fn new(engines: BTreeMap<EngineVariant, Engine>, primary: EngineVariant) -> Self {
        Self { engines, primary }
    }

    /// The factory line-up; turbo is the primary variant.
    pub fn factory_defaults() -> Self {
        let engines = EngineVariant::iter()
            .map(|variant| (variant, factory_engine(variant)))
            .collect();
        Self::new(engines, EngineVariant::Turbo)
    }

    pub fn get(&self, variant: EngineVariant) -> Option<&Engine> {
        self.engines.get(&variant)
    }

    pub fn primary(&self) -> EngineVariant {
        self.primary
    }

    pub fn primary_engine(&self) -> Option<&Engine> {
        self.get(self.primary)
    }

    pub fn listings(&self) -> Vec<EngineListing> {
        self.engines
            .iter()
            .map(|(variant, engine)| EngineListing {
                variant: *variant,
                primary: *variant == self.primary,
                engine: engine.clone(),
            })
            .collect()
    }
}

impl Default for EngineCatalog {
    fn default() -> Self {
        Self::factory_defaults()
    }
}

fn factory_engine(variant: EngineVariant) -> Engine {
    match variant {
        EngineVariant::Turbo => Engine {
            model: EngineModel::Xpto1,
            horsepower: 180,
            cylinders: 4,
            displacement_litres: 1.5,
            kind: EngineKind::Turbo,
        },
        EngineVariant::Electric => Engine {
            model: EngineModel::Th40,
            horsepower: 110,
            cylinders: 3,
            displacement_litres: 1.4,
            kind: EngineKind::Electric,
        },
        EngineVariant::Aspirated => Engine {
            model: EngineModel::Xpto0,
            horsepower: 120,
            cylinders: 4,
            displacement_litres: 2.0,
            kind: EngineKind::Aspirated,
        },
    }
}
