//! Wire types for the provider payload.
//!
//! Field names match the JSON served by `GET /api/solar-data`. Every
//! top-level field is required; optional reading fields stay absent on
//! re-serialization when they were absent on input.

use serde::{Deserialize, Deserializer, Serialize};

use super::classification::{classify, FlareClass};
use crate::error::{Result, SolarError};

/// Human-readable alert string, computed upstream and displayed verbatim.
pub type Alert = String;

/// A single X-ray flux measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlareReading {
    pub time_tag: String,
    /// Irradiance in W/m²
    pub flux: f64,
    pub energy: String,
    /// Provider-side label. Never trusted; see [`FlareReading::flare_class`].
    ///
    /// `None` when the key is absent, `Some(None)` for an explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub classification: Option<Option<String>>,
}

impl FlareReading {
    pub fn provider_classification(&self) -> Option<&str> {
        self.classification.as_ref()?.as_deref()
    }

    /// Tier derived from the measured flux.
    pub fn flare_class(&self) -> FlareClass {
        classify(self.flux)
    }
}

/// Planetary K-index reading, carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeomagneticReading {
    pub time_tag: String,
    pub kp_index: f64,
    /// Same absent / `null` / value distinction as `FlareReading::classification`
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub storm_level: Option<Option<String>>,
}

impl GeomagneticReading {
    pub fn storm_level(&self) -> Option<&str> {
        self.storm_level.as_ref()?.as_deref()
    }
}

/// Marks a key that was present, even when its value is `null`.
fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// One complete payload as of a single fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSnapshot {
    pub flares: Vec<FlareReading>,
    pub geomagnetic: Vec<GeomagneticReading>,
    pub last_updated: String,
    pub alerts: Vec<Alert>,
}

impl SolarSnapshot {
    /// Decode and validate a provider response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let snapshot: SolarSnapshot = serde_json::from_str(body)
            .map_err(|e| SolarError::malformed(format!("invalid solar data payload: {}", e)))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the numeric invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for (i, flare) in self.flares.iter().enumerate() {
            if !flare.flux.is_finite() || flare.flux <= 0.0 {
                return Err(SolarError::malformed(format!(
                    "flare #{} at {} has non-positive flux {}",
                    i, flare.time_tag, flare.flux
                )));
            }
        }

        for (i, reading) in self.geomagnetic.iter().enumerate() {
            if !reading.kp_index.is_finite() {
                return Err(SolarError::malformed(format!(
                    "geomagnetic reading #{} at {} has invalid kp index",
                    i, reading.time_tag
                )));
            }
        }

        Ok(())
    }

    /// Last flare as supplied by the provider (no re-sorting).
    pub fn latest_flare(&self) -> Option<&FlareReading> {
        self.flares.last()
    }

    pub fn latest_geomagnetic(&self) -> Option<&GeomagneticReading> {
        self.geomagnetic.last()
    }
}
