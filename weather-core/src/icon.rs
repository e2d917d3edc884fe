//! Condition icon selection.
//!
//! Maps a provider classification (`main`, `description`, night flag) to one
//! of a fixed set of icon/tone pairs. The mapping is total: unknown
//! categories fall back to the generic cloudy icon.

use crate::WeatherReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    DaySunny,
    NightClear,
    DayCloudy,
    Cloudy,
    Raindrops,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
    Smoke,
    Dust,
}

impl WeatherIcon {
    /// Terminal glyph for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::DaySunny => "☀",
            Self::NightClear => "☾",
            Self::DayCloudy => "⛅",
            Self::Cloudy => "☁",
            Self::Raindrops => "💧",
            Self::Rain => "🌧",
            Self::Snow => "❄",
            Self::Thunderstorm => "⛈",
            Self::Fog => "🌫",
            Self::Smoke => "💨",
            Self::Dust => "🌪",
        }
    }
}

/// Icon color, named after the palette shade it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconTone {
    Yellow300,
    Yellow400,
    Yellow500,
    Gray300,
    Gray400,
    Blue200,
    Blue300,
    Blue500,
}

impl IconTone {
    /// RGB value of the shade.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Yellow300 => (0xfd, 0xe0, 0x47),
            Self::Yellow400 => (0xfa, 0xcc, 0x15),
            Self::Yellow500 => (0xea, 0xb3, 0x08),
            Self::Gray300 => (0xd1, 0xd5, 0xdb),
            Self::Gray400 => (0x9c, 0xa3, 0xaf),
            Self::Blue200 => (0xbf, 0xdb, 0xfe),
            Self::Blue300 => (0x93, 0xc5, 0xfd),
            Self::Blue500 => (0x3b, 0x82, 0xf6),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconChoice {
    pub icon: WeatherIcon,
    pub tone: IconTone,
}

impl IconChoice {
    const fn new(icon: WeatherIcon, tone: IconTone) -> Self {
        Self { icon, tone }
    }
}

const FALLBACK: IconChoice = IconChoice::new(WeatherIcon::Cloudy, IconTone::Gray400);

/// Pick the icon for a condition. Both strings are matched case-insensitively.
pub fn select_icon(main: &str, description: &str, is_night: bool) -> IconChoice {
    use self::{IconTone::*, WeatherIcon::*};

    let main = main.to_lowercase();
    let description = description.to_lowercase();

    match main.as_str() {
        "clear" if is_night => IconChoice::new(NightClear, Yellow300),
        "clear" => IconChoice::new(DaySunny, Yellow400),
        "clouds" if description.contains("few") || description.contains("scattered") => {
            IconChoice::new(DayCloudy, Gray300)
        }
        "clouds" => IconChoice::new(Cloudy, Gray400),
        "rain" if description.contains("light") => IconChoice::new(Raindrops, Blue300),
        "rain" => IconChoice::new(Rain, Blue500),
        "drizzle" => IconChoice::new(Raindrops, Blue300),
        "snow" => IconChoice::new(Snow, Blue200),
        "thunderstorm" => IconChoice::new(Thunderstorm, Yellow500),
        "mist" | "fog" | "haze" => IconChoice::new(Fog, Gray400),
        "smoke" => IconChoice::new(Smoke, Gray400),
        "dust" => IconChoice::new(Dust, Yellow300),
        _ => FALLBACK,
    }
}

impl WeatherReading {
    pub fn icon(&self) -> IconChoice {
        select_icon(&self.condition_main, &self.condition_description, self.is_night)
    }
}
