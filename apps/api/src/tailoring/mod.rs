// Tailoring: prompt, completion call, and formatting of the returned text.
// All completion calls go through llm_client; nothing here talks HTTP.

pub mod formatter;
pub mod handlers;
pub mod highlight;
pub mod prompts;
pub mod service;
