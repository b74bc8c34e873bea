// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Every user-facing answer is in Serbian (Latin script).
pub const SERBIAN_LANGUAGE_INSTRUCTION: &str = "na srpskom jeziku";

/// MIME type requested from the model for schema-constrained output.
pub const JSON_RESPONSE_MIME_TYPE: &str = "application/json";
