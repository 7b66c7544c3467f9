pub(crate) mod api;
mod prompts;
mod provider;

pub use provider::GeminiProvider;
