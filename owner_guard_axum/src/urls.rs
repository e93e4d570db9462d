//! Fixed locations the handlers redirect to

/// Where note create, edit and delete land on success.
pub(crate) const NOTES_SUCCESS_URL: &str = "/done/";

/// Comment section of a news item's page.
pub(crate) fn news_comments_url(news_id: i64) -> String {
    format!("/news/{news_id}/#comments")
}
