//! Prompt templates and reply parsing for the LLM inference adapter.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::tutoring::{IntentCatalog, Stage, NEUTRAL_BAND};

/// Sampling settings per operation.
pub const CLASSIFY_TEMPERATURE: f32 = 0.1;
pub const TRANSITION_TEMPERATURE: f32 = 0.1;
pub const TRANSITION_MAX_TOKENS: u32 = 10;
pub const REPLY_TEMPERATURE: f32 = 0.7;
pub const REPLY_MAX_TOKENS: u32 = 300;

/// Asks the model to score an utterance against every catalog entry.
pub fn classification_prompt(catalog: &IntentCatalog, utterance: &str) -> String {
    let labels: Vec<&str> = catalog.labels().collect();
    format!(
        "You detect intentions in a student's speech.\n\
         For each of the following {count} intentions, estimate how strongly it is present \
         in the student's phrase, as a number between 0 and 1.\n\
         Intentions, in order: {labels}\n\
         Answer with exactly {count} comma-separated numbers in the same order and nothing else.\n\
         Phrase: \"{utterance}\"",
        count = labels.len(),
        labels = labels.join(", "),
        utterance = utterance,
    )
}

/// Yes/no readiness question for leaving `stage`; `None` for the terminal stage.
pub fn readiness_question(stage: Stage, utterance: &str) -> Option<String> {
    let question = match stage {
        Stage::Introduction => {
            format!("Is this an agreement to start the lesson: \"{}\"? Answer: yes/no", utterance)
        }
        Stage::Outline => {
            format!("Is this a valid essay outline? \"{}\". Answer: yes/no", utterance)
        }
        Stage::Drafting => format!("Is this a finished essay? \"{}\". Answer: yes/no", utterance),
        Stage::Assessment => return None,
    };
    Some(question)
}

/// Narrates the participant profile from a polarity gap, one line per axis.
pub fn student_profile(catalog: &IntentCatalog, polarity_gap: &[f64]) -> String {
    let mut profile = String::from("Student profile:\n");
    for (axis, value) in polarity_gap.iter().enumerate() {
        let Some(trait_label) = catalog.label_for(axis, *value) else {
            continue;
        };
        profile.push_str(&format!("The student is {}\n", trait_label));
        if *value < NEUTRAL_BAND {
            profile.push_str(&format!("Needs correction: {}\n", trait_label));
        }
    }
    profile
}

/// Final instruction appended to the history when composing a staged reply.
pub fn reply_prompt(utterance: &str, profile: &str, stage_notice: &str) -> String {
    format!(
        "Last student message: {}\n{}{}\n\
         Write the tutor's reply (up to 150 words), taking the student profile into account.",
        utterance, profile, stage_notice
    )
}

/// Decimal or integer literal; a sign is only taken with a fractional part.
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d*\.\d+|\d+").expect("number pattern is valid"));

/// Extracts every decimal or integer literal from free text, in order.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}
