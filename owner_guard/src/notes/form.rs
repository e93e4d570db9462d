use serde::Deserialize;

use crate::form::{FormErrors, FormOutcome, REQUIRED};

use super::slug::slugify;
use super::types::NoteDraft;

pub const TITLE_MAX_LEN: usize = 100;
pub const SLUG_MAX_LEN: usize = 100;

/// Appended to the offending slug when it is already taken.
pub const SLUG_WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

const INVALID_SLUG: &str =
    "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.";
const UNDERIVABLE_SLUG: &str =
    "Could not build a slug from the title. Please enter one.";

/// Note creation/edit form as submitted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    /// Blank or missing means "derive from the title".
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteForm {
    /// Field checks that need no storage. The returned draft always has a slug;
    /// whether it is unique is decided by the caller.
    pub(crate) fn clean(&self) -> FormOutcome<NoteDraft> {
        let mut errors = FormErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", REQUIRED);
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.add("title", max_len_message(TITLE_MAX_LEN));
        }

        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", REQUIRED);
        }

        let slug = match self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(given) => {
                if given.chars().count() > SLUG_MAX_LEN {
                    errors.add("slug", max_len_message(SLUG_MAX_LEN));
                } else if !given
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                {
                    errors.add("slug", INVALID_SLUG);
                }
                given.to_string()
            }
            None => {
                let derived = derive_slug(title);
                if derived.is_empty() && !title.is_empty() {
                    errors.add("slug", UNDERIVABLE_SLUG);
                }
                derived
            }
        };

        if !errors.is_empty() {
            return FormOutcome::Invalid(errors);
        }

        FormOutcome::Valid(NoteDraft {
            title: title.to_string(),
            text: text.to_string(),
            slug,
        })
    }
}

/// Slug from the title, cut to the column width.
fn derive_slug(title: &str) -> String {
    let slug: String = slugify(title).chars().take(SLUG_MAX_LEN).collect();
    slug.trim_end_matches('-').to_string()
}

pub(crate) fn duplicate_slug_message(slug: &str) -> String {
    format!("{slug}{SLUG_WARNING}")
}

fn max_len_message(max: usize) -> String {
    format!("Ensure this value has at most {max} characters.")
}
