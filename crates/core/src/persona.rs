//! Persona: who the assistant impersonates and the system prompt built from it.
//!
//! The profile document is read exactly once at startup:
//!
//! 1. **`.pdf`**: text is extracted page by page (requires the `pdf` feature)
//! 2. **anything else**: read as UTF-8 text (markdown, plain text)
//!
//! A profile that can't be read never stops the process: the text is replaced
//! by [`PROFILE_PLACEHOLDER`] and a warning is logged.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Substituted when the profile document can't be loaded.
pub const PROFILE_PLACEHOLDER: &str = "Profile not available";

/// Text loaded from a profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The extracted text (or the placeholder)
    pub text: String,

    /// Where the text came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Whether the document was actually read
    pub loaded: bool,
}

impl Profile {
    /// A profile that was never loaded.
    pub fn placeholder() -> Self {
        Self {
            text: PROFILE_PLACEHOLDER.into(),
            source: None,
            loaded: false,
        }
    }

    /// Use literal text as the profile.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
            loaded: true,
        }
    }

    /// Load a profile document, falling back to the placeholder on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(text) if !text.trim().is_empty() => {
                debug!(file = %path.display(), chars = text.len(), "Loaded profile document");
                Self {
                    text,
                    source: Some(path.to_path_buf()),
                    loaded: true,
                }
            }
            Ok(_) => {
                warn!(file = %path.display(), "Profile document has no text, using placeholder");
                Self {
                    source: Some(path.to_path_buf()),
                    ..Self::placeholder()
                }
            }
            Err(reason) => {
                warn!(file = %path.display(), error = %reason, "Could not read profile document, using placeholder");
                Self {
                    source: Some(path.to_path_buf()),
                    ..Self::placeholder()
                }
            }
        }
    }

    /// Read the document, returning a printable reason on failure.
    pub fn try_load(path: &Path) -> Result<String, String> {
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            extract_pdf_text(path)
        } else {
            std::fs::read_to_string(path).map_err(|e| e.to_string())
        }
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf_text(path: &Path) -> Result<String, String> {
    // The extractor panics on some malformed documents
    std::panic::catch_unwind(|| pdf_extract::extract_text(path))
        .map_err(|_| "PDF extraction panicked".to_string())?
        .map_err(|e| e.to_string())
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf_text(_path: &Path) -> Result<String, String> {
    Err("PDF support not compiled in (enable the `pdf` feature)".into())
}

/// The impersonated person and everything the prompt says about them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Full name of the person
    pub name: String,

    /// Short summary; the profile text doubles as summary when none is given
    pub summary: Profile,

    /// The main profile document (e.g. an exported LinkedIn PDF)
    pub profile: Profile,

    /// Link to the person's GitHub profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Persona {
    pub fn new(name: impl Into<String>, profile: Profile) -> Self {
        Self {
            name: name.into(),
            summary: profile.clone(),
            profile,
            github: None,
        }
    }

    /// Use a separate summary document instead of repeating the profile.
    pub fn with_summary(mut self, summary: Profile) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_github(mut self, github: impl Into<String>) -> Self {
        self.github = Some(github.into());
        self
    }

    /// Render the system prompt that opens every conversation.
    pub fn system_prompt(&self) -> String {
        let name = &self.name;
        let mut prompt = String::with_capacity(
            1024 + self.summary.text.len() + self.profile.text.len(),
        );

        prompt.push_str(&format!(
            "You are acting as {name}. You are answering questions on {name}'s website, \
             particularly questions related to {name}'s career, background, skills and experience. \
             Your responsibility is to represent {name} for interactions on the website as faithfully as possible. \
             Be professional and engaging, as if talking to a potential client or future employer who came across the website. \
             If you don't know the answer to any question, use your record_unknown_question tool to record the question \
             that you couldn't answer, even if it's about something trivial or unrelated to career. \
             If the user is engaging in discussion, try to steer them towards getting in touch via email; \
             ask for their email and record it using your record_user_details tool.\n"
        ));

        prompt.push_str("\n## Summary:\n");
        prompt.push_str(self.summary.text.trim());
        prompt.push('\n');

        prompt.push_str("\n## Profile:\n");
        prompt.push_str(self.profile.text.trim());
        prompt.push('\n');

        if let Some(github) = &self.github {
            prompt.push_str("\n## GitHub Profile:\n");
            prompt.push_str(github);
            prompt.push('\n');
        }

        prompt.push_str(&format!("\nStay in character as {name}.\n"));
        prompt
    }
}
