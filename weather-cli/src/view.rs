//! Text rendering of the search state.

use crossterm::style::{Color, Stylize, style};
use weather_core::{SearchState, SearchStatus, WeatherReading};

const TITLE: &str = "Weather Finder";
const IDLE_HINT: &str = "Enter a city name to search.";
const LOADING: &str = "Loading...";

/// Render the whole panel. With `color` off the output is plain text.
pub fn render(state: &SearchState, color: bool) -> String {
    let mut lines = vec![String::new(), title(color), String::new()];

    match state.status() {
        SearchStatus::Idle => lines.push(IDLE_HINT.to_string()),
        SearchStatus::Loading => lines.push(LOADING.to_string()),
        SearchStatus::Error => {
            let message = state.error().unwrap_or_default();
            lines.push(if color { style(message).red().to_string() } else { message.to_string() });
        }
        SearchStatus::Success => {
            if let Some(reading) = state.displayed_reading() {
                lines.extend(render_reading(reading, color));
            }
            if let Some(line) = feedback_line(state) {
                lines.push(String::new());
                lines.push(line);
            }
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn title(color: bool) -> String {
    if color { style(TITLE).bold().to_string() } else { TITLE.to_string() }
}

fn render_reading(reading: &WeatherReading, color: bool) -> Vec<String> {
    let choice = reading.icon();
    let glyph = choice.icon.glyph();
    let icon = if color {
        let (r, g, b) = choice.tone.rgb();
        style(glyph).with(Color::Rgb { r, g, b }).to_string()
    } else {
        glyph.to_string()
    };

    let mut lines = vec![
        reading.location_name.clone(),
        format!("{icon}  {}", capitalize_words(&reading.condition_description)),
        reading.display_temperature(),
    ];

    if let Some(observed) = reading.observed_at {
        lines.push(format!("Observed {}", observed.format("%Y-%m-%d %H:%M UTC")));
    }

    lines
}

/// Confirmation line for the current feedback, if any.
pub fn feedback_line(state: &SearchState) -> Option<String> {
    state
        .feedback()
        .map(|feedback| format!("You {} this weather update.", feedback.past_tense()))
}

/// Upper-case the first letter of every word: "light rain" -> "Light Rain".
fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
