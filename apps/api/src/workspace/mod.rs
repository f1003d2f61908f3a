// Application state: the job-description and résumé data the user edits,
// the pure transitions over it, and the HTTP handlers that drive them.

pub mod handlers;
pub mod models;
pub mod transitions;
