// Repository interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod conversation_repository;

pub use conversation_repository::ConversationRepository;
