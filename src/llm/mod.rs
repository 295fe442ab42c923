//! Optional remote-model pass over the heuristic message.

pub mod client;
pub mod prompt;
pub mod retry;

pub use client::{
    ChatMessage, ChatRequest, ChatTransport, Destination, HttpTransport, OPENAI_ENDPOINT,
    OPENROUTER_ENDPOINT, extract_content, generate_message, prepare, resolve_api_key,
    resolve_endpoint,
};
pub use prompt::{PromptContext, build_user_prompt, clean_message, default_system_prompt, truncate_diff};
