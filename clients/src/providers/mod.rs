pub(crate) mod elevenlabs;
pub(crate) mod gemini;

pub use elevenlabs::ElevenLabsProvider;
pub use gemini::GeminiProvider;
