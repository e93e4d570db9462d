use chrono::{Duration, Utc};

use crate::config::NEWS_COUNT_ON_HOME_PAGE;
use crate::form::FormOutcome;
use crate::guard::{Identity, Operation, filter_owned, stamp_owner};
use crate::news::{
    Comment, CommentEntry, CommentForm, CommentStore, News, NewsDraft, NewsError, NewsStore,
};
use crate::storage::DataStore;

use super::auth_helpers::{deny, ensure_owner};
use super::errors::CoordinationError;

const NEWS: &str = "News";
const COMMENT: &str = "Comment";

/// Everything the news detail page shows.
#[derive(Debug, Clone)]
pub struct NewsPage {
    pub news: News,
    /// Oldest first.
    pub comments: Vec<CommentEntry>,
    /// Comments the viewer wrote and may therefore edit or delete.
    pub own_comment_ids: Vec<i64>,
    /// Only logged-in viewers get a comment form.
    pub show_form: bool,
}

impl NewsPage {
    pub fn owns(&self, comment_id: &i64) -> bool {
        self.own_comment_ids.contains(comment_id)
    }
}

/// Latest news for the home page, newest first.
pub async fn home_news(data: &DataStore) -> Result<Vec<News>, CoordinationError> {
    Ok(NewsStore::list_latest(data, *NEWS_COUNT_ON_HOME_PAGE).await?)
}

pub async fn news_detail(
    data: &DataStore,
    viewer: &Identity,
    news_id: i64,
) -> Result<NewsPage, CoordinationError> {
    let news = NewsStore::get(data, news_id)
        .await?
        .ok_or_else(|| CoordinationError::not_found(NEWS, news_id).log())?;
    let comments = CommentStore::list_for_news(data, news_id).await?;

    let own_comment_ids = filter_owned(viewer, comments.iter().cloned())
        .into_iter()
        .map(|entry| entry.comment.id)
        .collect();

    Ok(NewsPage {
        news,
        comments,
        own_comment_ids,
        show_form: viewer.is_authenticated(),
    })
}

/// Add a comment by the requester under news item `news_id`.
#[tracing::instrument(skip(data, form))]
pub async fn create_comment(
    data: &DataStore,
    requester: &Identity,
    news_id: i64,
    form: &CommentForm,
    next: &str,
) -> Result<FormOutcome<Comment>, CoordinationError> {
    let stamped = stamp_owner(requester, form, next).map_err(|d| deny(d, COMMENT, ""))?;

    if NewsStore::get(data, news_id).await?.is_none() {
        return Err(CoordinationError::not_found(NEWS, news_id).log());
    }

    let draft = match stamped.draft().clean() {
        FormOutcome::Valid(draft) => draft,
        FormOutcome::Invalid(errors) => return Ok(FormOutcome::Invalid(errors)),
    };

    let comment = CommentStore::create(data, news_id, stamped.owner(), &draft).await?;
    Ok(FormOutcome::Valid(comment))
}

/// Comment `comment_id`, if the requester wrote it.
pub async fn get_owned_comment(
    data: &DataStore,
    requester: &Identity,
    comment_id: i64,
    operation: Operation,
    next: &str,
) -> Result<Comment, CoordinationError> {
    let comment = CommentStore::get(data, comment_id).await?;
    ensure_owner(
        requester,
        comment,
        operation,
        next,
        COMMENT,
        &comment_id.to_string(),
    )
}

#[tracing::instrument(skip(data, form))]
pub async fn update_comment(
    data: &DataStore,
    requester: &Identity,
    comment_id: i64,
    form: &CommentForm,
    next: &str,
) -> Result<FormOutcome<Comment>, CoordinationError> {
    let comment = get_owned_comment(data, requester, comment_id, Operation::Edit, next).await?;

    match form.clean() {
        FormOutcome::Valid(draft) => Ok(FormOutcome::Valid(
            CommentStore::update_text(data, comment.id, &draft).await?,
        )),
        FormOutcome::Invalid(errors) => Ok(FormOutcome::Invalid(errors)),
    }
}

/// Delete the requester's comment and return what was removed.
#[tracing::instrument(skip(data))]
pub async fn delete_comment(
    data: &DataStore,
    requester: &Identity,
    comment_id: i64,
    next: &str,
) -> Result<Comment, CoordinationError> {
    let comment = get_owned_comment(data, requester, comment_id, Operation::Delete, next).await?;
    CommentStore::delete(data, comment.id).await?;
    Ok(comment)
}

/// Publish a news item. News has no author; this is for fixtures and seeding.
pub async fn create_news(data: &DataStore, draft: &NewsDraft) -> Result<News, CoordinationError> {
    Ok(NewsStore::create(data, draft).await?)
}

/// Remove a news item together with its comments.
pub async fn delete_news(data: &DataStore, news_id: i64) -> Result<(), CoordinationError> {
    match NewsStore::delete(data, news_id).await {
        Err(NewsError::NewsNotFound) => Err(CoordinationError::not_found(NEWS, news_id).log()),
        other => Ok(other?),
    }
}

/// Fill an empty news table with sample items, one per day going back from today.
///
/// Returns how many items were added.
pub async fn seed_demo_news(data: &DataStore, count: usize) -> Result<usize, CoordinationError> {
    if NewsStore::count(data).await? > 0 {
        tracing::debug!("News table not empty, skipping seed");
        return Ok(0);
    }

    let today = Utc::now().date_naive();
    for index in 0..count {
        let draft = NewsDraft {
            title: format!("Новость {}", index + 1),
            text: "Просто текст.".to_string(),
            date: today - Duration::days(index as i64),
        };
        NewsStore::create(data, &draft).await?;
    }

    tracing::info!(count, "Seeded demo news");
    Ok(count)
}
