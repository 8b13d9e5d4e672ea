//! Chain-of-Thought Chat API Library
//!
//! Four role-specialized agents refine an answer one after another; this
//! library provides the agents and their chain, the Gemini model client,
//! the conversation domain and the HTTP adapter serving the chat UI.

pub mod agents;
pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
