//! Prompt text sent to Gemini

use crate::{ChatRole, ChatTurn};

pub(crate) fn language_analysis(text: &str, target_language: &str) -> String {
    format!(
        r#"You are a supportive language tutor. Analyze the following text written or spoken by a learner of the language with code "{target_language}".

Respond with a single JSON object using exactly this shape:
{{
  "score": <overall quality score from 0 to 100>,
  "feedback": "<short encouraging summary for the learner>",
  "grammar": {{ "errors": [{{ "original": "...", "correction": "...", "explanation": "..." }}], "score": <0-100> }},
  "vocabulary": {{ "suggestions": ["..."], "level": "beginner" | "intermediate" | "advanced" }},
  "pronunciation": {{ "score": <0-100>, "feedback": "...", "phonemes": [{{ "phoneme": "...", "issue": "..." }}] }},
  "cultural": {{ "context": "<cultural notes, or empty string>" }}
}}

Text: {text}"#
    )
}

pub(crate) fn real_time_guidance(previous_context: Option<&serde_json::Value>) -> String {
    let mut prompt = String::from(
        r#"You are a real-time navigation assistant for a person with a visual impairment, looking through their phone camera.

Describe only what matters for moving safely: obstacles, steps, doors, people, vehicles and the clear path ahead. Be brief and concrete, using clock directions and approximate distances.

Respond with a single JSON object:
{
  "guidance": "<one or two short spoken sentences>",
  "hazards": ["<hazard>", ...],
  "context": "<compact summary of the scene to compare against the next frame>"
}"#,
    );

    if let Some(context) = previous_context {
        let context = match context {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        prompt.push_str("\n\nPrevious frame context (mention only what changed): ");
        prompt.push_str(&context);
    }
    prompt
}

/// Turns of earlier conversation included in a reply prompt
pub(crate) const HISTORY_TURNS: usize = 5;

const ASSISTANT_PERSONA: &str = "You are a friendly, patient voice assistant for people with visual impairments. Speak naturally and warmly, and describe things clearly.

You can help with:
- Describing scenes and objects when an image is provided
- Reading text from labels, signs, letters, bills and recipes
- Shopping: product details, prices and comparisons
- Navigation: locations, landmarks and step-by-step directions
- Daily tasks such as reminders and to-do lists

If the user asks about something visual and an image is attached, describe it in detail. If they ask you to read something, read all of the text.";

pub(crate) fn conversation(message: &str, history: &[ChatTurn]) -> String {
    let mut prompt = String::new();
    let recent = &history[history.len().saturating_sub(HISTORY_TURNS)..];
    if !recent.is_empty() {
        prompt.push_str("Previous conversation:\n");
        for turn in recent {
            let speaker = match turn.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {}\n", speaker, turn.content));
        }
        prompt.push('\n');
    }
    prompt.push_str(ASSISTANT_PERSONA);
    prompt.push_str("\n\nUser message: ");
    prompt.push_str(message);
    prompt
}

pub(crate) const DESCRIBE_SCENE: &str = "Describe this image in detail, focusing on:
- What objects and people are visible
- The layout and spatial arrangement
- Colors, textures, and visual details
- Any text that appears
- The overall scene context

Be descriptive and helpful for someone who cannot see the image.";
