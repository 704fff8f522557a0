use crate::state::BoardEvent;
use crate::types::DraftPost;

/// Two editable text fields. `submit` drains them into a draft event; no
/// validation, empty strings pass through to the server contract.
#[derive(Debug, Default)]
pub struct PostForm {
    title: String,
    content: String,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Build a draft from the current field values and reset both fields.
    pub fn submit(&mut self) -> BoardEvent {
        let draft = DraftPost {
            title: std::mem::take(&mut self.title),
            content: std::mem::take(&mut self.content),
        };
        BoardEvent::DraftSubmitted(draft)
    }
}
