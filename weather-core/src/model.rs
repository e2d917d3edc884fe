use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized current-weather observation for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    /// Raw provider value; rounding happens at display time.
    pub temperature_c: f64,
    /// Primary classification, e.g. "Rain", "Clouds".
    pub condition_main: String,
    /// Free-text detail, e.g. "light rain".
    pub condition_description: String,
    pub is_night: bool,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherReading {
    /// Temperature rounded to whole degrees, e.g. `"16°C"` for 15.6.
    pub fn display_temperature(&self) -> String {
        format!("{}°C", self.temperature_c.round() as i64)
    }
}

/// User feedback on the displayed reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Like,
    Dislike,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Like => "like",
            Feedback::Dislike => "dislike",
        }
    }

    /// Past-tense verb used in the confirmation line.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Feedback::Like => "liked",
            Feedback::Dislike => "disliked",
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
