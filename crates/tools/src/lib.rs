//! The tools alterego exposes to the model.
//!
//! There are exactly two, both of which push a notification to the person
//! behind the persona:
//! - `record_user_details`: a visitor left an email address
//! - `record_unknown_question`: the model couldn't answer a question
//!
//! Calls are decoded into the [`ToolInvocation`] union before they run.

pub mod invocation;
pub mod record_unknown_question;
pub mod record_user_details;
pub mod registry;

pub use invocation::ToolInvocation;
pub use record_unknown_question::RecordUnknownQuestion;
pub use record_user_details::RecordUserDetails;
pub use registry::ToolRegistry;
