//! Interactive search loop: prompt for a city, show the result, ask for feedback.

use std::fmt;

use inquire::{InquireError, Select, Text};
use weather_core::{Feedback, SearchState, WeatherProvider};

use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedbackOption {
    Like,
    Dislike,
    Skip,
}

impl FeedbackOption {
    const ALL: [FeedbackOption; 3] = [Self::Like, Self::Dislike, Self::Skip];

    fn feedback(self) -> Option<Feedback> {
        match self {
            Self::Like => Some(Feedback::Like),
            Self::Dislike => Some(Feedback::Dislike),
            Self::Skip => None,
        }
    }
}

impl fmt::Display for FeedbackOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Like => "👍 Like",
            Self::Dislike => "👎 Dislike",
            Self::Skip => "Skip",
        })
    }
}

pub async fn run(provider: &dyn WeatherProvider, color: bool) -> anyhow::Result<()> {
    let mut state = SearchState::new();
    println!("{}", view::render(&state, color));

    loop {
        let input = match Text::new("City:")
            .with_placeholder("Enter city name...")
            .with_help_message("Enter to search, Esc to quit")
            .with_initial_value(state.city_input())
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        state.set_city_input(input);

        let Some(ticket) = state.begin_search() else {
            continue;
        };
        println!("{}", view::render(&state, color));

        let result = provider.fetch_reading(ticket.city()).await;
        state.complete_search(&ticket, result);
        println!("{}", view::render(&state, color));

        while state.displayed_reading().is_some() {
            let Some(choice) = prompt_feedback()? else {
                break;
            };
            if !apply_choice(&mut state, choice) {
                break;
            }
            if let Some(line) = view::feedback_line(&state) {
                println!("{line}\n");
            }
        }
    }

    Ok(())
}

/// Record one pick. Returns `false` once the user is done rating.
fn apply_choice(state: &mut SearchState, choice: FeedbackOption) -> bool {
    match choice.feedback() {
        Some(feedback) => {
            tracing::debug!(%feedback, "feedback selected");
            state.on_feedback_selected(feedback);
            true
        }
        None => false,
    }
}

/// Ask for a rating; `None` when the prompt is dismissed.
fn prompt_feedback() -> anyhow::Result<Option<FeedbackOption>> {
    match Select::new("How is this weather update?", FeedbackOption::ALL.to_vec())
        .with_help_message("Pick again to change your rating, Skip or Esc to search again")
        .prompt()
    {
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
