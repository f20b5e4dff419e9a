// Content generation: prompt template, response schema, style validation
// and the orchestrator that ties them to the remote model.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod validation;
