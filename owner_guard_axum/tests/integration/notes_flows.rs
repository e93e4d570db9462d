use http::StatusCode;

use owner_guard_axum::owner_guard::{
    Note, Operation, SLUG_WARNING, User, get_owned_note, list_notes, slugify,
};

use crate::common::*;

async fn notes_of(cast: &Cast, user: &User) -> Vec<Note> {
    list_notes(&cast.state.data, &identity(user), "/notes/")
        .await
        .expect("list notes")
}

async fn all_notes(cast: &Cast) -> usize {
    notes_of(cast, &cast.author).await.len() + notes_of(cast, &cast.reader).await.len()
}

fn note_form<'a>(title: &'a str, text: &'a str, slug: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![("title", title), ("text", text), ("slug", slug)]
}

#[tokio::test]
async fn test_pages_available_for_anonymous_user() {
    let cast = Cast::notes().await;
    for path in ["/", "/auth/login/", "/auth/logout/", "/auth/signup/"] {
        let page = cast.anonymous.get(path).await;
        assert_eq!(page.status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_pages_available_for_logged_in_user() {
    let cast = Cast::notes().await;
    for path in ["/notes/", "/add/", "/done/"] {
        let page = cast.reader_client.get(path).await;
        assert_eq!(page.status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_note_pages_only_for_author() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    for path in [
        format!("/note/{NOTE_SLUG}/"),
        format!("/edit/{NOTE_SLUG}/"),
        format!("/delete/{NOTE_SLUG}/"),
    ] {
        let page = cast.author_client.get(&path).await;
        assert_eq!(page.status, StatusCode::OK, "author {path}");

        let page = cast.reader_client.get(&path).await;
        assert_eq!(page.status, StatusCode::NOT_FOUND, "reader {path}");
    }
}

#[tokio::test]
async fn test_missing_note_looks_like_foreign_note() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    let foreign = cast.reader_client.get(&format!("/note/{NOTE_SLUG}/")).await;
    let missing = cast.reader_client.get("/note/no-such-note/").await;
    assert_eq!(foreign.status, missing.status);
    assert_eq!(foreign.body, missing.body);
}

#[tokio::test]
async fn test_redirects_for_anonymous_client() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    for path in [
        "/notes/".to_string(),
        "/add/".to_string(),
        "/done/".to_string(),
        format!("/note/{NOTE_SLUG}/"),
        format!("/edit/{NOTE_SLUG}/"),
        format!("/delete/{NOTE_SLUG}/"),
    ] {
        let page = cast.anonymous.get(&path).await;
        assert_eq!(page.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(
            page.location.as_deref(),
            Some(format!("/auth/login/?next={path}").as_str())
        );
        assert_eq!(page.location, Some(login_redirect(&path)));
    }
}

#[tokio::test]
async fn test_list_shows_only_own_notes() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    let page = cast.author_client.get("/notes/").await;
    assert!(page.body.contains(NOTE_TITLE));
    assert!(page.body.contains(&format!("/note/{NOTE_SLUG}/")));

    let page = cast.reader_client.get("/notes/").await;
    assert!(!page.body.contains(&format!("/note/{NOTE_SLUG}/")));
}

#[tokio::test]
async fn test_create_and_edit_pages_contain_form() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    for path in ["/add/".to_string(), format!("/edit/{NOTE_SLUG}/")] {
        let page = cast.author_client.get(&path).await;
        assert!(page.body.contains("<form"), "{path}");
        assert!(page.body.contains(r#"name="title""#), "{path}");
        assert!(page.body.contains(r#"name="csrf_token""#), "{path}");
    }
}

#[tokio::test]
async fn test_user_can_create_note() {
    let cast = Cast::notes().await;

    let page = cast
        .author_client
        .post_form("/add/", &note_form("Новый заголовок", "Новый текст", "new-slug"))
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/done/"));

    let notes = notes_of(&cast, &cast.author).await;
    assert_eq!(notes.len(), 1);
    let note = &notes[0];
    assert_eq!(note.title, "Новый заголовок");
    assert_eq!(note.text, "Новый текст");
    assert_eq!(note.slug, "new-slug");
    assert_eq!(note.author_id(), &cast.author.id);
}

#[tokio::test]
async fn test_anonymous_user_cant_create_note() {
    let cast = Cast::notes().await;

    let page = cast
        .anonymous
        .post_form("/add/", &note_form("Заголовок", "Текст", "anon"))
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect("/add/")));
    assert_eq!(all_notes(&cast).await, 0);
}

#[tokio::test]
async fn test_not_unique_slug() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    let page = cast
        .reader_client
        .post_form("/add/", &note_form("Другой", "Другой текст", NOTE_SLUG))
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(&format!("{NOTE_SLUG}{SLUG_WARNING}")));
    assert_eq!(all_notes(&cast).await, 1);
}

#[tokio::test]
async fn test_empty_slug() {
    let cast = Cast::notes().await;

    let page = cast
        .author_client
        .post_form("/add/", &[("title", "Новая заметка"), ("text", "Текст")])
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let notes = notes_of(&cast, &cast.author).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].slug, slugify("Новая заметка"));
}

#[tokio::test]
async fn test_author_can_edit_note() {
    let cast = Cast::notes().await;
    let note = cast.note_by_author().await;

    let page = cast
        .author_client
        .post_form(
            &format!("/edit/{NOTE_SLUG}/"),
            &note_form("Новый заголовок", "Новый текст", "edited-slug"),
        )
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/done/"));

    let edited = get_owned_note(
        &cast.state.data,
        &identity(&cast.author),
        "edited-slug",
        Operation::ReadDetail,
        "/",
    )
    .await
    .expect("edited note");
    assert_eq!(edited.id, note.id);
    assert_eq!(edited.title, "Новый заголовок");
    assert_eq!(edited.text, "Новый текст");
    assert_eq!(edited.author_id(), &cast.author.id);
}

#[tokio::test]
async fn test_other_user_cant_edit_note() {
    let cast = Cast::notes().await;
    let note = cast.note_by_author().await;

    let page = cast
        .reader_client
        .post_form(
            &format!("/edit/{NOTE_SLUG}/"),
            &note_form("Новый заголовок", "Новый текст", "edited-slug"),
        )
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let unchanged = get_owned_note(
        &cast.state.data,
        &identity(&cast.author),
        NOTE_SLUG,
        Operation::ReadDetail,
        "/",
    )
    .await
    .expect("note kept");
    assert_eq!(unchanged, note);
}

#[tokio::test]
async fn test_anonymous_user_cant_edit_note() {
    let cast = Cast::notes().await;
    let note = cast.note_by_author().await;
    let path = format!("/edit/{NOTE_SLUG}/");

    let page = cast
        .anonymous
        .post_form(&path, &note_form("Новый заголовок", "Новый текст", "edited-slug"))
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect(&path)));

    let unchanged = get_owned_note(
        &cast.state.data,
        &identity(&cast.author),
        NOTE_SLUG,
        Operation::ReadDetail,
        "/",
    )
    .await
    .expect("note kept");
    assert_eq!(unchanged, note);
}

#[tokio::test]
async fn test_anonymous_user_cant_delete_note() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;
    let path = format!("/delete/{NOTE_SLUG}/");

    let page = cast.anonymous.post_form(&path, &[]).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect(&path)));
    assert_eq!(all_notes(&cast).await, 1);
}

#[tokio::test]
async fn test_author_can_delete_note() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    let page = cast
        .author_client
        .post_form(&format!("/delete/{NOTE_SLUG}/"), &[])
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/done/"));
    assert_eq!(all_notes(&cast).await, 0);
}

#[tokio::test]
async fn test_other_user_cant_delete_note() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    let page = cast
        .reader_client
        .post_form(&format!("/delete/{NOTE_SLUG}/"), &[])
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert_eq!(all_notes(&cast).await, 1);
}

#[tokio::test]
async fn test_post_without_csrf_token_is_forbidden() {
    let cast = Cast::notes().await;
    cast.note_by_author().await;

    let page = cast
        .author_client
        .post_raw_form(&format!("/delete/{NOTE_SLUG}/"), &[("csrf_token", "wrong")])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);

    let page = cast
        .author_client
        .post_raw_form("/add/", &note_form("T", "x", "no-token"))
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
    assert_eq!(all_notes(&cast).await, 1);
}
