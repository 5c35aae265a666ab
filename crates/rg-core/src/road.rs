//! Road classification.

/// Length assigned to a road segment whose length the map source omits.
pub const DEFAULT_LENGTH_KM: f64 = 0.01;

/// Class of a road segment.  Drives the car/bus speed in travel-time routing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadType {
    CityStreet,
    Residential,
    Connector,
    /// Any class the speed table has no dedicated entry for.
    #[default]
    Other,
}

impl RoadType {
    /// Map a map-file label to a road class.
    ///
    /// Matching is case-insensitive and treats `_`/`-` as spaces, so
    /// `"city street"`, `"City_Street"` and `"city-street"` all map to
    /// [`RoadType::CityStreet`].  Unrecognised labels map to
    /// [`RoadType::Other`] rather than failing.
    pub fn from_label(label: &str) -> RoadType {
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "city street" => RoadType::CityStreet,
            "residential" => RoadType::Residential,
            "connector"   => RoadType::Connector,
            _             => RoadType::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadType::CityStreet  => "city street",
            RoadType::Residential => "residential",
            RoadType::Connector   => "connector",
            RoadType::Other       => "other",
        }
    }
}

impl std::fmt::Display for RoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
