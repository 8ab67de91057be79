// Roadmap generation endpoint: prompt templating, Gemini call, shape
// validation and best-effort persistence.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;
