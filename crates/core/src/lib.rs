//! # alterego core
//!
//! Domain types, traits, and error definitions for the alterego persona
//! chat backend. This crate has **no HTTP or framework dependencies**: it
//! defines the model every other crate implements against.
//!
//! ## Layout
//!
//! Each external collaborator (completion API, notification service) is a
//! trait here. Implementations live in their own crates, which keeps them
//! swappable in tests.

pub mod error;
pub mod event;
pub mod message;
pub mod notify;
pub mod persona;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, Error, NotifyError, ProviderError, ToolError};
pub use event::{DomainEvent, EventBus};
pub use message::{Conversation, ConversationId, Message, MessageToolCall, Role};
pub use notify::Notifier;
pub use persona::{PROFILE_PLACEHOLDER, Persona, Profile};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StopReason, ToolDefinition, Usage};
pub use tool::{ToolResult, UnknownToolPolicy};
