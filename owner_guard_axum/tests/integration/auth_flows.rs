use http::StatusCode;

use owner_guard_axum::owner_guard::{LOGIN_REDIRECT_URL, LOGIN_URL, SESSION_COOKIE_NAME};

use crate::common::*;

fn signup_fields<'a>(username: &'a str, password: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("username", username),
        ("password1", password),
        ("password2", password),
    ]
}

#[tokio::test]
async fn test_auth_pages_for_anonymous_user() {
    let cast = Cast::notes().await;
    for path in ["/auth/login/", "/auth/signup/", "/auth/logout/"] {
        let page = cast.anonymous.get(path).await;
        assert_eq!(page.status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_signup_redirects_to_login() {
    let cast = Cast::notes().await;
    let page = cast
        .anonymous
        .post_form("/auth/signup/", &signup_fields("new_user", PASSWORD))
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some(LOGIN_URL.as_str()));

    let page = cast
        .anonymous
        .post_form(
            "/auth/login/",
            &[("username", "new_user"), ("password", PASSWORD)],
        )
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_signup_rejects_taken_username() {
    let cast = Cast::notes().await;
    let fields = signup_fields("twice", PASSWORD);
    cast.anonymous.post_form("/auth/signup/", &fields).await;

    let page = cast.anonymous.post_form("/auth/signup/", &fields).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("already exists"));
}

#[tokio::test]
async fn test_login_follows_next() {
    let cast = Cast::notes().await;
    let page = cast
        .anonymous
        .post_form(
            "/auth/login/",
            &[
                ("username", AUTHOR),
                ("password", PASSWORD),
                ("next", "/add/"),
            ],
        )
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/add/"));

    let cookie = page.set_cookie.expect("session cookie");
    assert!(cookie.starts_with(&format!("{}=", SESSION_COOKIE_NAME.as_str())));
}

#[tokio::test]
async fn test_login_next_from_query() {
    let cast = Cast::notes().await;
    let page = cast
        .anonymous
        .post_form(
            "/auth/login/?next=%2Fnotes%2F",
            &[("username", AUTHOR), ("password", PASSWORD)],
        )
        .await;
    assert_eq!(page.location.as_deref(), Some("/notes/"));
}

#[tokio::test]
async fn test_login_ignores_foreign_next() {
    let cast = Cast::notes().await;
    for next in ["https://evil.example/", "//evil.example/"] {
        let page = cast
            .anonymous
            .post_form(
                "/auth/login/",
                &[
                    ("username", AUTHOR),
                    ("password", PASSWORD),
                    ("next", next),
                ],
            )
            .await;
        assert_eq!(page.status, StatusCode::SEE_OTHER);
        assert_eq!(page.location.as_deref(), Some(LOGIN_REDIRECT_URL.as_str()));
    }
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let cast = Cast::notes().await;
    let page = cast
        .anonymous
        .post_form(
            "/auth/login/",
            &[("username", AUTHOR), ("password", "wrong")],
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.set_cookie.is_none());
    assert!(page.body.contains("Please enter a correct username and password"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let cast = Cast::notes().await;
    assert_eq!(
        cast.author_client.get("/notes/").await.status,
        StatusCode::OK
    );

    let page = cast.author_client.post_form("/auth/logout/", &[]).await;
    assert_eq!(page.status, StatusCode::OK);
    let cookie = page.set_cookie.expect("clearing cookie");
    assert!(cookie.contains("Max-Age=0"));

    let page = cast.author_client.get("/notes/").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(login_redirect("/notes/")));
}
