//! Common types shared across the ISG crates.
//!
//! This crate defines the device table (which sub-page lives at which query
//! suffix, and which parameter slot backs which setting), the fixed output
//! labels of the statistics mapping, and observability helpers. It is
//! intentionally lightweight so every other crate can depend on it.
//!
//! # Overview
//!
//! - [`DeviceTable`]: endpoint suffixes and parameter-key aliases
//! - [`DevicePages`], [`ParameterKeys`]: the two halves of the table
//! - [`labels`]: human-readable keys of the statistics mapping
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use isg_common::DeviceTable;
//!
//! let table = DeviceTable::default();
//! assert_eq!(table.pages.heating, "?s=4,0");
//! assert_eq!(table.keys.heating_comfort_temperature, "val16");
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Query suffixes (relative to `http://<host>/`) of the device sub-pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePages {
    /// Anlage: system overview statistics.
    pub system: String,
    /// Wärmepumpe: heat-pump statistics.
    pub heat_pump: String,
    /// Heizen: heating settings.
    pub heating: String,
    /// Warmwasser: hot-water settings.
    pub hot_water: String,
    /// Kühlen: cooling settings.
    pub cooling: String,
    /// Start page.
    pub overview: String,
    /// Write target for form posts.
    pub save: String,
}

impl Default for DevicePages {
    fn default() -> Self {
        Self {
            system: "?s=1,0".to_string(),
            heat_pump: "?s=1,2".to_string(),
            heating: "?s=4,0".to_string(),
            hot_water: "?s=4,1".to_string(),
            cooling: "?s=4,2".to_string(),
            overview: "?s=0".to_string(),
            save: "save.php".to_string(),
        }
    }
}

/// Device-side parameter slots (`valNN`) backing each setting.
///
/// Several settings deliberately share a slot: the overview page reports the
/// indoor temperature under `val16` and the hot-water temperature under
/// `val22`, the same ids the heating and hot-water pages use for their
/// comfort temperatures. The numbering is the device's, keep it as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterKeys {
    pub indoor_temperature: String,
    pub hot_water_temperature: String,
    pub heating_comfort_temperature: String,
    pub heating_eco_temperature: String,
    pub heating_curve_slope: String,
    pub hot_water_comfort_temperature: String,
    pub hot_water_eco_temperature: String,
}

impl Default for ParameterKeys {
    fn default() -> Self {
        Self {
            indoor_temperature: "val16".to_string(),           // e.g. 24.1
            hot_water_temperature: "val22".to_string(),        // e.g. 50.0
            heating_comfort_temperature: "val16".to_string(),  // e.g. 20.0
            heating_eco_temperature: "val17".to_string(),      // e.g. 16.0
            heating_curve_slope: "val25".to_string(),          // e.g. 0.7
            hot_water_comfort_temperature: "val22".to_string(), // e.g. 50.0
            hot_water_eco_temperature: "val23".to_string(),    // e.g. 50.0
        }
    }
}

impl ParameterKeys {
    /// Keys the heating page reports via `jsvalues`.
    pub fn heating(&self) -> [&str; 3] {
        [
            self.heating_comfort_temperature.as_str(),
            self.heating_eco_temperature.as_str(),
            self.heating_curve_slope.as_str(),
        ]
    }

    /// Keys the hot-water page reports via `jsvalues`.
    pub fn hot_water(&self) -> [&str; 2] {
        [
            self.hot_water_comfort_temperature.as_str(),
            self.hot_water_eco_temperature.as_str(),
        ]
    }
}

/// Full description of one device's web interface.
///
/// Passed to the device client and the aggregator so tests can point them
/// at a mock table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTable {
    pub pages: DevicePages,
    pub keys: ParameterKeys,
}

/// Labels of the statistics mapping that are not taken from table rows.
pub mod labels {
    pub const COOLING: &str = "KUEHLEN";
    pub const HEATING_COMFORT_TEMPERATURE: &str = "HEIZEN KOMFORTTEMPERATUR";
    pub const HEATING_ECO_TEMPERATURE: &str = "HEIZEN ECOTEMPERATUR";
    pub const HEATING_CURVE_SLOPE: &str = "HEIZUNG STEIGUNG-HEIZKURVE";
    pub const HOT_WATER_COMFORT_TEMPERATURE: &str = "WARMWASSER KOMFORTTEMPERATUR";
    pub const HOT_WATER_ECO_TEMPERATURE: &str = "WARMWASSER ECOTEMPERATUR";
    pub const INDOOR_TEMPERATURE: &str = "TEMPERATUR INNENRAUM";
    pub const HOT_WATER_TEMPERATURE: &str = "TEMPERATUR WARMWASSER";
    pub const OPERATING_MODE: &str = "BETRIEBSART";

    /// Every fixed label, in collection order.
    pub const ALL: [&str; 9] = [
        COOLING,
        HEATING_COMFORT_TEMPERATURE,
        HEATING_ECO_TEMPERATURE,
        HEATING_CURVE_SLOPE,
        HOT_WATER_COMFORT_TEMPERATURE,
        HOT_WATER_ECO_TEMPERATURE,
        INDOOR_TEMPERATURE,
        HOT_WATER_TEMPERATURE,
        OPERATING_MODE,
    ];
}
