//! Handling of generative-model input and output.
//!
//! The model itself is an external collaborator: this module builds the
//! prompts sent to it and turns its free-text answers back into trusted,
//! typed values. Nothing here performs I/O.
//!
//! ```
//! use michi_core::ai::{extract_json, validate_plan};
//!
//! let text = "Here you go:\n```json\n{\"days\": []}\n```";
//! let value = extract_json(text).unwrap();
//! assert!(validate_plan(&value, 0).is_ok());
//! assert!(validate_plan(&value, 2).is_err());
//! ```

pub mod drafts;
pub mod extract;
pub mod prompt;
pub mod schema;

pub use drafts::{select_drafts, DRAFT_COUNT};
pub use extract::extract_json;
pub use prompt::{build_drafts_prompt, build_plan_prompt, PromptMessage, Role};
pub use schema::validate_plan;
