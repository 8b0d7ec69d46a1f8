use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Manufacturer {
    Honda,
    Toyota,
    Ford,
    Volkswagen,
    Chevrolet,
    Fiat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KeyKind {
    Traditional,
    Smart,
}

/// The key offered to the ignition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Key {
    pub manufacturer: Manufacturer,
    pub kind: KeyKind,
}

/// Configuration keys of the engine catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EngineVariant {
    Aspirated,
    Electric,
    Turbo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EngineKind {
    Aspirated,
    Electric,
    Turbo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
pub enum EngineModel {
    #[serde(rename = "XPTO-0")]
    #[strum(serialize = "XPTO-0")]
    Xpto0,
    #[serde(rename = "XPTO-1")]
    #[strum(serialize = "XPTO-1")]
    Xpto1,
    #[serde(rename = "TH-40")]
    #[strum(serialize = "TH-40")]
    Th40,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Engine {
    pub model: EngineModel,
    pub horsepower: u32,
    pub cylinders: u8,
    pub displacement_litres: f64,
    pub kind: EngineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum CarModel {
    #[serde(rename = "HR-V")]
    #[strum(serialize = "HR-V")]
    Hrv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Colour {
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IgnitionStatus {
    Started,
    FailedToStart,
}

impl IgnitionStatus {
    pub fn description(self) -> &'static str {
        match self {
            IgnitionStatus::Started => "Car started successfully",
            IgnitionStatus::FailedToStart => "Could not start the car",
        }
    }
}

/// Only a key from the car's own manufacturer starts it.
pub fn ignite(required: Manufacturer, supplied: Manufacturer) -> IgnitionStatus {
    if required == supplied {
        IgnitionStatus::Started
    } else {
        IgnitionStatus::FailedToStart
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub model: CarModel,
    pub colour: Colour,
    pub manufacturer: Manufacturer,
    pub engine: Engine,
}

impl Car {
    /// The black Honda HR-V every factory test runs on.
    pub fn honda_hrv(engine: Engine) -> Self {
        Self {
            model: CarModel::Hrv,
            colour: Colour::Black,
            manufacturer: Manufacturer::Honda,
            engine,
        }
    }

    pub fn ignite(&self, key: &Key) -> IgnitionStatus {
        ignite(self.manufacturer, key.manufacturer)
    }
}

/// Response body of a factory test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IgnitionReport {
    pub status: IgnitionStatus,
    #[schema(example = "Car started successfully")]
    pub description: String,
}

impl From<IgnitionStatus> for IgnitionReport {
    fn from(status: IgnitionStatus) -> Self {
        Self {
            status,
            description: status.description().to_string(),
        }
    }
}

/// One catalog entry as listed over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EngineListing {
    pub variant: EngineVariant,
    pub primary: bool,
    pub engine: Engine,
}
