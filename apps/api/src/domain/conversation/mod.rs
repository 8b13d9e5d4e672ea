// Conversation domain module
// Contains the conversation aggregate root and chat message value objects

#![allow(clippy::module_inception)]

pub mod conversation;
pub mod value_objects;

// Re-export main types for convenience
pub use conversation::Conversation;
pub use value_objects::{ChatMessage, ChatRole};
