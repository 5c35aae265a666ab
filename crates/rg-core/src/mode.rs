//! Travel modes and the speed table that turns road length into travel time.
//!
//! | Mode     | Speed (km/h)                                          |
//! |----------|-------------------------------------------------------|
//! | `Car`    | city street 80, residential 60, connector 40          |
//! | `Bus`    | same as `Car`                                         |
//! | `Walk`   | 7.2 on every road class                               |
//! | `Flight` | 900 on every road class                               |
//!
//! Road classes without a table entry ([`RoadType::Other`]) use
//! [`SpeedTable::fallback_kmh`] for car and bus.

use std::str::FromStr;

use crate::{CoreError, CoreResult, RoadType};

// ── TravelMode ────────────────────────────────────────────────────────────────

/// The means of transport used for travel-time weighting.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    Car,
    Bus,
    Walk,
    Flight,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] =
        [TravelMode::Car, TravelMode::Bus, TravelMode::Walk, TravelMode::Flight];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Car    => "car",
            TravelMode::Bus    => "bus",
            TravelMode::Walk   => "walk",
            TravelMode::Flight => "flight",
        }
    }
}

impl FromStr for TravelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car"    => Ok(TravelMode::Car),
            "bus"    => Ok(TravelMode::Bus),
            "walk"   => Ok(TravelMode::Walk),
            "flight" => Ok(TravelMode::Flight),
            _        => Err(CoreError::UnknownMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CostMode ──────────────────────────────────────────────────────────────────

/// What a Dijkstra query minimises: road length, or travel time for a mode.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostMode {
    /// Edge weight is the segment length in kilometres.
    #[default]
    DistanceOnly,
    /// Edge weight is the travel time in hours for the given mode.
    TravelTime(TravelMode),
}

impl FromStr for CostMode {
    type Err = CoreError;

    /// Accepts `"distance"` or any [`TravelMode`] name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("distance") {
            return Ok(CostMode::DistanceOnly);
        }
        s.parse::<TravelMode>().map(CostMode::TravelTime)
    }
}

impl From<TravelMode> for CostMode {
    fn from(mode: TravelMode) -> Self {
        CostMode::TravelTime(mode)
    }
}

impl std::fmt::Display for CostMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostMode::DistanceOnly     => f.write_str("distance"),
            CostMode::TravelTime(mode) => write!(f, "{mode}"),
        }
    }
}

// ── SpeedTable ────────────────────────────────────────────────────────────────

/// Speed configuration for travel-time routing, in km/h.
///
/// `Default` reproduces the table in the module docs.  Applications with
/// their own speed assumptions construct one explicitly and hand it to the
/// search query, which rejects it unless [`validate`](Self::validate)
/// passes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedTable {
    pub city_street_kmh: f64,
    pub residential_kmh: f64,
    pub connector_kmh:   f64,
    /// Car/bus speed on [`RoadType::Other`] segments.
    pub fallback_kmh:    f64,
    pub walk_kmh:        f64,
    pub flight_kmh:      f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            city_street_kmh: 80.0,
            residential_kmh: 60.0,
            connector_kmh:   40.0,
            fallback_kmh:    40.0,
            walk_kmh:        7.2,
            flight_kmh:      900.0,
        }
    }
}

impl SpeedTable {
    /// Check that every speed is positive and finite, so travel times are
    /// never negative, infinite or `NaN`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidSpeed`] naming the first offending setting.
    pub fn validate(&self) -> CoreResult<()> {
        let settings = [
            ("city_street_kmh", self.city_street_kmh),
            ("residential_kmh", self.residential_kmh),
            ("connector_kmh",   self.connector_kmh),
            ("fallback_kmh",    self.fallback_kmh),
            ("walk_kmh",        self.walk_kmh),
            ("flight_kmh",      self.flight_kmh),
        ];
        match settings.into_iter().find(|&(_, kmh)| !(kmh > 0.0 && kmh.is_finite())) {
            Some((setting, kmh)) => Err(CoreError::InvalidSpeed { setting, kmh }),
            None => Ok(()),
        }
    }

    /// `self`, if it passes [`validate`](Self::validate).
    pub fn validated(self) -> CoreResult<Self> {
        self.validate().map(|()| self)
    }

    /// Speed of `mode` on a road of class `road_type`.
    pub fn speed_kmh(&self, road_type: RoadType, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Car | TravelMode::Bus => match road_type {
                RoadType::CityStreet  => self.city_street_kmh,
                RoadType::Residential => self.residential_kmh,
                RoadType::Connector   => self.connector_kmh,
                RoadType::Other       => self.fallback_kmh,
            },
            TravelMode::Walk   => self.walk_kmh,
            TravelMode::Flight => self.flight_kmh,
        }
    }

    /// Hours needed to cover `length_km` of `road_type` by `mode`.
    #[inline]
    pub fn travel_hours(&self, length_km: f64, road_type: RoadType, mode: TravelMode) -> f64 {
        length_km / self.speed_kmh(road_type, mode)
    }
}
