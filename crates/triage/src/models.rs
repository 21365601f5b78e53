//! These models represent the objects passed between the router and the LLM
//!
//! A single request only ever carries two messages: the specialist's system
//! instruction followed by the (possibly augmented) user query. The wire
//! format matches the OpenAI chat completions schema, which is also what
//! Groq and most hosted endpoints accept.
pub mod credential;
pub mod message;
pub mod role;
