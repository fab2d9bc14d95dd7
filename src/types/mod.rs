// Public modules
pub mod chat_completion;
pub mod chat_message;
pub mod model;

// Re-exports
pub use chat_completion::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, CompletionUsage, ResponseMessage,
};
pub use chat_message::{ChatMessage, Role};
pub use model::{KnownModel, Model};
