//! Emergency keyword screen.
//!
//! A deliberately blunt substring check over a fixed keyword list. This is
//! a conversational triage hint for the AI model, not a medical system;
//! false negatives are accepted.

/// Keywords that flag a message as a possible medical emergency.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "can't breathe",
    "bleeding",
    "suicidal",
    "passed out",
    "faint",
    "severe pain",
    "difficulty breathing",
];

/// Returns true when the message contains any emergency keyword as a
/// case-insensitive substring.
pub fn is_emergency(message: &str) -> bool {
    let message = message.to_lowercase();
    EMERGENCY_KEYWORDS
        .iter()
        .any(|keyword| message.contains(keyword))
}
