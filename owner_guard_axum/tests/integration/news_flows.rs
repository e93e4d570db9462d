use http::{Method, StatusCode};

use owner_guard_axum::owner_guard::{
    BAD_WORDS, CommentEntry, Identity, NEWS_COUNT_ON_HOME_PAGE, News, WARNING, news_detail,
};

use crate::common::*;

async fn thread(cast: &Cast, news: &News) -> Vec<CommentEntry> {
    news_detail(&cast.state.data, &Identity::Anonymous, news.id)
        .await
        .expect("news page")
        .comments
}

fn position(body: &str, needle: &str) -> usize {
    body.find(needle)
        .unwrap_or_else(|| panic!("{needle} not on page"))
}

#[tokio::test]
async fn test_home_page_for_everyone() {
    let cast = Cast::news().await;
    for client in [&cast.anonymous, &cast.reader_client] {
        let page = client.get("/").await;
        assert_eq!(page.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_detail_page_for_everyone() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    for client in [&cast.anonymous, &cast.reader_client] {
        let page = client.get(&format!("/news/{}/", news.id)).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Заголовок"));
    }
}

#[tokio::test]
async fn test_missing_news_is_not_found() {
    let cast = Cast::news().await;
    let page = cast.anonymous.get("/news/999/").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_news_count_on_home_page() {
    let cast = Cast::news().await;
    let total = *NEWS_COUNT_ON_HOME_PAGE + 1;
    for day in 0..total {
        cast.news_item(&format!("Новость №{day:02}"), day as i64).await;
    }

    let page = cast.anonymous.get("/").await;
    let shown = page.body.matches("<article>").count();
    assert_eq!(shown, *NEWS_COUNT_ON_HOME_PAGE);
}

#[tokio::test]
async fn test_news_order_newest_first() {
    let cast = Cast::news().await;
    cast.news_item("Старая новость", 3).await;
    cast.news_item("Свежая новость", 0).await;
    cast.news_item("Вчерашняя новость", 1).await;

    let page = cast.anonymous.get("/").await;
    let fresh = position(&page.body, "Свежая новость");
    let yesterday = position(&page.body, "Вчерашняя новость");
    let old = position(&page.body, "Старая новость");
    assert!(fresh < yesterday && yesterday < old);
}

#[tokio::test]
async fn test_comments_order_oldest_first() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    for index in 0..5 {
        cast.comment_by_author(&news, &format!("Комментарий {index}"))
            .await;
    }

    let page = cast.anonymous.get(&format!("/news/{}/", news.id)).await;
    let positions: Vec<usize> = (0..5)
        .map(|index| position(&page.body, &format!("Комментарий {index}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let stored = thread(&cast, &news).await;
    assert!(
        stored
            .windows(2)
            .all(|w| w[0].comment.created <= w[1].comment.created)
    );
}

#[tokio::test]
async fn test_comment_form_only_for_logged_in_users() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let path = format!("/news/{}/", news.id);

    let page = cast.anonymous.get(&path).await;
    assert!(!page.body.contains(r#"name="text""#));

    let page = cast.reader_client.get(&path).await;
    assert!(page.body.contains(r#"name="text""#));
}

#[tokio::test]
async fn test_edit_links_only_for_comment_author() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;
    let path = format!("/news/{}/", news.id);
    let edit_link = format!("/edit_comment/{}/", comment.id);

    assert!(cast.author_client.get(&path).await.body.contains(&edit_link));
    assert!(!cast.reader_client.get(&path).await.body.contains(&edit_link));
    assert!(!cast.anonymous.get(&path).await.body.contains(&edit_link));
}

#[tokio::test]
async fn test_anonymous_user_cant_create_comment() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let path = format!("/news/{}/", news.id);

    let page = cast.anonymous.post_form(&path, &[("text", COMMENT_TEXT)]).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect(&path)));
    assert!(thread(&cast, &news).await.is_empty());
}

#[tokio::test]
async fn test_user_can_create_comment() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;

    let page = cast
        .reader_client
        .post_form(&format!("/news/{}/", news.id), &[("text", COMMENT_TEXT)])
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(
        page.location,
        Some(format!("/news/{}/#comments", news.id))
    );

    let comments = thread(&cast, &news).await;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment.text, COMMENT_TEXT);
    assert_eq!(comments[0].comment.news_id, news.id);
    assert_eq!(comments[0].comment.author_id(), &cast.reader.id);
    assert_eq!(comments[0].author_name, READER);
}

#[tokio::test]
async fn test_user_cant_use_bad_words() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;

    let text = format!("Какой-то текст, {}, еще текст", BAD_WORDS[0]);
    let page = cast
        .reader_client
        .post_form(&format!("/news/{}/", news.id), &[("text", text.as_str())])
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(WARNING));
    assert!(thread(&cast, &news).await.is_empty());
}

#[tokio::test]
async fn test_comment_pages_only_for_author() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;

    for path in [
        format!("/edit_comment/{}/", comment.id),
        format!("/delete_comment/{}/", comment.id),
    ] {
        assert_eq!(cast.author_client.get(&path).await.status, StatusCode::OK);
        assert_eq!(
            cast.reader_client.get(&path).await.status,
            StatusCode::NOT_FOUND
        );

        let page = cast.anonymous.get(&path).await;
        assert_eq!(page.status, StatusCode::SEE_OTHER);
        assert_eq!(page.location, Some(login_redirect(&path)));
    }
}

#[tokio::test]
async fn test_author_can_delete_comment() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;

    let page = cast
        .author_client
        .post_form(&format!("/delete_comment/{}/", comment.id), &[])
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(
        page.location,
        Some(format!("/news/{}/#comments", news.id))
    );
    assert!(thread(&cast, &news).await.is_empty());
}

#[tokio::test]
async fn test_author_can_delete_comment_with_delete_method() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;
    let path = format!("/delete_comment/{}/", comment.id);

    let page = cast
        .author_client
        .send_with_header(Method::DELETE, &path, None)
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
    assert_eq!(thread(&cast, &news).await.len(), 1);

    let token = cast.author_client.csrf_token().map(str::to_string);
    let page = cast
        .author_client
        .send_with_header(Method::DELETE, &path, token.as_deref())
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert!(thread(&cast, &news).await.is_empty());
}

#[tokio::test]
async fn test_user_cant_delete_comment_of_another_user() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;
    let path = format!("/delete_comment/{}/", comment.id);

    let page = cast.reader_client.post_form(&path, &[]).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let token = cast.reader_client.csrf_token().map(str::to_string);
    let page = cast
        .reader_client
        .send_with_header(Method::DELETE, &path, token.as_deref())
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    assert_eq!(thread(&cast, &news).await.len(), 1);
}

#[tokio::test]
async fn test_anonymous_user_cant_change_comment() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;

    let path = format!("/edit_comment/{}/", comment.id);
    let page = cast
        .anonymous
        .post_form(&path, &[("text", "Обновлённый комментарий")])
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect(&path)));

    let path = format!("/delete_comment/{}/", comment.id);
    let page = cast.anonymous.post_form(&path, &[]).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect(&path)));

    let page = cast
        .anonymous
        .send_with_header(Method::DELETE, &path, None)
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect(&path)));

    let comments = thread(&cast, &news).await;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment.text, COMMENT_TEXT);
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let cast = Cast::news().await;
    for path in ["/news/abc/", "/edit_comment/abc/", "/delete_comment/abc/"] {
        let page = cast.reader_client.get(path).await;
        assert_eq!(page.status, StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_author_can_edit_comment() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;

    let page = cast
        .author_client
        .post_form(
            &format!("/edit_comment/{}/", comment.id),
            &[("text", "Обновлённый комментарий")],
        )
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(
        page.location,
        Some(format!("/news/{}/#comments", news.id))
    );

    let comments = thread(&cast, &news).await;
    assert_eq!(comments[0].comment.text, "Обновлённый комментарий");
    assert_eq!(comments[0].comment.author_id(), &cast.author.id);
}

#[tokio::test]
async fn test_user_cant_edit_comment_of_another_user() {
    let cast = Cast::news().await;
    let news = cast.news_item("Заголовок", 0).await;
    let comment = cast.comment_by_author(&news, COMMENT_TEXT).await;

    let page = cast
        .reader_client
        .post_form(
            &format!("/edit_comment/{}/", comment.id),
            &[("text", "Обновлённый комментарий")],
        )
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert_eq!(thread(&cast, &news).await[0].comment.text, COMMENT_TEXT);
}
