//! Frontend side of the post board: the HTTP client SDK, the in-memory
//! board state, and the submission form.

pub mod client;
pub mod form;
pub mod state;
pub mod types;

pub use client::PostClient;
pub use form::PostForm;
pub use state::{BoardEvent, PostBoard};
pub use types::{DraftPost, Post};
