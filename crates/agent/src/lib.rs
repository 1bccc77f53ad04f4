//! The conversation driver: the bounded tool-calling loop at the heart of alterego.
//!
//! Each request runs the same cycle:
//!
//! 1. **Send** the full transcript and tool schemas to the provider
//! 2. **If tool calls**: decode and run each one, append the results, go to 1
//! 3. **Otherwise**: the assistant's text is the reply
//!
//! The loop gives up with `ToolLoopExceeded` once the round cap is spent.

pub mod driver;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use driver::ConversationDriver;
