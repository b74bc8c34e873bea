// AI diagnostics: device + symptom description (+ optional photo/video)
// in, a list of candidate fixes out. All LLM calls go through llm_client.

pub mod client;
pub mod composer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod session;
