use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Overcast,
    LightRain,
    HeavyRain,
    LightSnow,
    HeavySnow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecipitationKind {
    Rain,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Light,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    #[must_use]
    pub fn to_hex(self) -> u32 {
        (u32::from(self.0) << 16) | (u32::from(self.1) << 8) | u32::from(self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

pub const ALL_CATEGORIES: [WeatherCategory; 8] = [
    WeatherCategory::Sunny,
    WeatherCategory::PartlyCloudy,
    WeatherCategory::Cloudy,
    WeatherCategory::Overcast,
    WeatherCategory::LightRain,
    WeatherCategory::HeavyRain,
    WeatherCategory::LightSnow,
    WeatherCategory::HeavySnow,
];

impl WeatherCategory {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::PartlyCloudy => "partly_cloudy",
            Self::Cloudy => "cloudy",
            Self::Overcast => "overcast",
            Self::LightRain => "light_rain",
            Self::HeavyRain => "heavy_rain",
            Self::LightSnow => "light_snow",
            Self::HeavySnow => "heavy_snow",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Overcast => "Overcast",
            Self::LightRain => "Light rain",
            Self::HeavyRain => "Heavy rain",
            Self::LightSnow => "Light snow",
            Self::HeavySnow => "Heavy snow",
        }
    }

    /// Parses a category name, falling back to `Sunny` for anything unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ALL_CATEGORIES
            .into_iter()
            .find(|category| category.name() == normalized)
            .unwrap_or_else(|| {
                tracing::warn!(name, "unrecognized weather category, using sunny");
                Self::Sunny
            })
    }

    /// Debug trigger `1`..`8`, in declaration order.
    #[must_use]
    pub fn from_debug_key(key: char) -> Option<Self> {
        let idx = key.to_digit(10)?.checked_sub(1)?;
        ALL_CATEGORIES.get(idx as usize).copied()
    }

    #[must_use]
    pub fn precipitation(self) -> Option<(PrecipitationKind, Intensity)> {
        match self {
            Self::LightRain => Some((PrecipitationKind::Rain, Intensity::Light)),
            Self::HeavyRain => Some((PrecipitationKind::Rain, Intensity::Heavy)),
            Self::LightSnow => Some((PrecipitationKind::Snow, Intensity::Light)),
            Self::HeavySnow => Some((PrecipitationKind::Snow, Intensity::Heavy)),
            Self::Sunny | Self::PartlyCloudy | Self::Cloudy | Self::Overcast => None,
        }
    }

    #[must_use]
    pub fn background(self) -> Rgb {
        match self {
            Self::Sunny => Rgb::from_hex(0x87_CE_EB),
            Self::PartlyCloudy => Rgb::from_hex(0xAD_D8_E6),
            Self::Cloudy => Rgb::from_hex(0x70_80_90),
            Self::Overcast => Rgb::from_hex(0x4B_4B_4B),
            Self::LightRain => Rgb::from_hex(0x69_69_69),
            Self::HeavyRain => Rgb::from_hex(0x2F_4F_4F),
            Self::LightSnow => Rgb::from_hex(0xF0_F8_FF),
            Self::HeavySnow => Rgb::from_hex(0xE0_FF_FF),
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CLASSIFIER_RULES: &[(&[&str], WeatherCategory)] = &[
    (&["clear", "sunny"], WeatherCategory::Sunny),
    (&["partly cloudy"], WeatherCategory::PartlyCloudy),
    (&["cloudy"], WeatherCategory::Cloudy),
    (&["overcast"], WeatherCategory::Overcast),
    (&["light rain", "drizzle"], WeatherCategory::LightRain),
    (&["heavy rain", "shower"], WeatherCategory::HeavyRain),
    (&["light snow", "sleet"], WeatherCategory::LightSnow),
    (&["heavy snow", "blizzard"], WeatherCategory::HeavySnow),
];

/// Maps a free-text condition description onto a category. Rules are checked
/// in order and the first substring hit wins; no hit means `Sunny`.
#[must_use]
pub fn classify(description: &str) -> WeatherCategory {
    let text = description.to_lowercase();
    CLASSIFIER_RULES
        .iter()
        .find_map(|(needles, category)| {
            needles
                .iter()
                .any(|needle| text.contains(needle))
                .then_some(*category)
        })
        .unwrap_or_else(|| {
            tracing::debug!(description, "no classifier rule matched, using sunny");
            WeatherCategory::Sunny
        })
}

const CONDITION_LABELS: &[(u8, &str)] = &[
    (0, "Clear"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Freezing fog"),
    (51, "Light drizzle"),
    (53, "Drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Freezing drizzle"),
    (61, "Light rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Light snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Light rain shower"),
    (81, "Rain shower"),
    (82, "Torrential rain shower"),
    (85, "Light snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with light hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Condition description for a WMO weather code as reported by Open-Meteo.
#[must_use]
pub fn condition_label(code: u8) -> &'static str {
    CONDITION_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
        .unwrap_or("Unknown")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
        }
    }

    /// Used whenever no explicit or detected location is available.
    pub fn fallback() -> Self {
        Self {
            name: "Seoul".to_string(),
            latitude: 37.5665,
            longitude: 126.9780,
        }
    }
}
