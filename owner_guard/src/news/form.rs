use serde::Deserialize;

use crate::form::{FormErrors, FormOutcome, REQUIRED};

use super::types::CommentDraft;

/// Words that may not appear in a comment, compared case-insensitively.
pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Error shown on the comment field when it contains a bad word.
pub const WARNING: &str = "Не ругайтесь!";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    pub(crate) fn clean(&self) -> FormOutcome<CommentDraft> {
        let mut errors = FormErrors::new();
        let text = self.text.trim();

        if text.is_empty() {
            errors.add("text", REQUIRED);
        } else {
            let lowered = text.to_lowercase();
            if BAD_WORDS.iter().any(|word| lowered.contains(word)) {
                errors.add("text", WARNING);
            }
        }

        if !errors.is_empty() {
            return FormOutcome::Invalid(errors);
        }
        FormOutcome::Valid(CommentDraft {
            text: text.to_string(),
        })
    }
}
