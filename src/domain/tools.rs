//! Tool schema and tool-choice policy for the AI health assistant.
//!
//! The engine is told about two callable tools on every task: the emergency
//! screen and the hospital finder. Both resolve back through this service's
//! own HTTP surface when the model requests them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// System prompt attached to every task. The hospital-results template is
/// part of the contract with the model and must stay intact.
pub const ASSISTANT_INSTRUCTIONS: &str = "\
You are a friendly, empathetic, and casual AI health assistant.
Your main goal is to answer the user's *most recent message*.

1. First, ALWAYS check the user's new message for an emergency using the 'detectEmergency' tool.

2. For hospital requests:
   - Use the 'findNearByHospitals' tool which needs a 'location'.
   - Extract the location from the user's message (e.g., \"hospitals in Ikeja\" → location is \"Ikeja\").
   - If no location is provided (e.g., \"find hospitals near me\"), ask for their location.
   - DO NOT call 'findNearByHospitals' without a location.

   - When you receive hospital results, format them nicely like this:
     \"I found [count] healthcare facilities near [location]:

     1. [Hospital Name]
        📍 [Address]

     2. [Hospital Name]
        📍 [Address]

     Would you like directions to any of these?\"

3. If it's not an emergency and not a hospital request, just answer the question.
4. NEVER provide a medical diagnosis.";

/// Tool-choice policy sent with task creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// The model decides whether to call a tool.
    Auto,
    /// The model must call at least one tool.
    Required,
}

/// Picks the tool-choice policy for an incoming message.
///
/// Mentions of "hospital" or "clinic" (case-insensitive substring) force
/// mandatory tool use to bias the model toward the hospital finder;
/// everything else stays automatic.
pub fn tool_choice_for(message: &str) -> ToolChoice {
    let message = message.to_lowercase();
    if message.contains("hospital") || message.contains("clinic") {
        ToolChoice::Required
    } else {
        ToolChoice::Auto
    }
}

/// OpenAI-style function schema for the two assistant tools.
pub fn tool_schema() -> Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": "detectEmergency",
                "description": "Checks if a user's message contains keywords indicating a medical emergency.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "message": {
                            "type": "string",
                            "description": "The user's message to check for emergencies.",
                        },
                    },
                    "required": ["message"],
                },
            },
        },
        {
            "type": "function",
            "function": {
                "name": "findNearByHospitals",
                "description": "Finds up to 3 hospitals or clinics near a specific location provided by the user.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "location": {
                            "type": "string",
                            "description": "The city, state, address, or zip code to search near (e.g., 'Ikeja, Lagos' or '1281 Jennifer Lane, USA').",
                        },
                    },
                    "required": ["location"],
                },
            },
        },
    ])
}
