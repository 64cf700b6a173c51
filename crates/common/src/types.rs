use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a city session. Survives save and load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub Uuid);

impl CityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A tile position on the city map. Ordered row-major (y, then x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u16,
    pub y: u16,
}

impl TileCoord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl PartialOrd for TileCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TileCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identifier of a registered construction type, e.g. `coal_power`.
///
/// Saved worlds refer to construction types by this identifier only, so a
/// world can be loaded only once the type it names has been registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstructionTypeId(String);

impl ConstructionTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConstructionTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ConstructionTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Simulation pacing preset.
///
/// Each preset maps to the delay between simulation ticks in milliseconds.
/// `Paused` has a delay of zero and means no ticks are scheduled at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationSpeed {
    Paused,
    #[default]
    Slow,
    Medium,
    Fast,
}

impl SimulationSpeed {
    pub const ALL: [SimulationSpeed; 4] = [Self::Paused, Self::Slow, Self::Medium, Self::Fast];

    /// Delay between ticks in milliseconds.
    pub const fn delay_ms(self) -> u32 {
        match self {
            Self::Paused => 0,
            Self::Slow => 100,
            Self::Medium => 50,
            Self::Fast => 10,
        }
    }

    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Paused => "paused",
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for SimulationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown simulation speed '{0}' (expected paused, slow, medium or fast)")]
pub struct ParseSpeedError(pub String);

impl FromStr for SimulationSpeed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSpeedError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_id_uniqueness() {
        let a = CityId::new();
        let b = CityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn tile_coord_orders_row_major() {
        let mut tiles = vec![
            TileCoord::new(5, 1),
            TileCoord::new(0, 2),
            TileCoord::new(9, 0),
            TileCoord::new(1, 1),
        ];
        tiles.sort();
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(9, 0),
                TileCoord::new(1, 1),
                TileCoord::new(5, 1),
                TileCoord::new(0, 2),
            ]
        );
    }

    #[test]
    fn construction_type_id_displays_raw() {
        let id = ConstructionTypeId::from("coal_power");
        assert_eq!(id.to_string(), "coal_power");
        assert_eq!(id.as_str(), "coal_power");
    }

    #[test]
    fn default_speed_is_slow() {
        assert_eq!(SimulationSpeed::default(), SimulationSpeed::Slow);
    }

    #[test]
    fn faster_presets_have_shorter_delays() {
        assert!(SimulationSpeed::Fast.delay_ms() < SimulationSpeed::Medium.delay_ms());
        assert!(SimulationSpeed::Medium.delay_ms() < SimulationSpeed::Slow.delay_ms());
        assert!(SimulationSpeed::Paused.is_paused());
        assert_eq!(SimulationSpeed::Paused.delay_ms(), 0);
    }

    #[test]
    fn speed_parses_case_insensitively() {
        assert_eq!("FAST".parse::<SimulationSpeed>(), Ok(SimulationSpeed::Fast));
        assert_eq!(" medium ".parse::<SimulationSpeed>(), Ok(SimulationSpeed::Medium));
        assert!("warp".parse::<SimulationSpeed>().is_err());
    }

    #[test]
    fn speed_name_roundtrips_through_parse() {
        for speed in SimulationSpeed::ALL {
            assert_eq!(speed.to_string().parse::<SimulationSpeed>(), Ok(speed));
        }
    }
}
