use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, HeaderName, LOCATION, SET_COOKIE};
use http::{Method, Request, StatusCode};
use tower::ServiceExt;

use owner_guard_axum::owner_guard::{IssuedSession, SESSION_COOKIE_NAME};

/// Status, headers and body of one response.
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

/// Drives a router the way a browser would, without a network.
///
/// Redirects are not followed. A logged-in browser sends its session cookie and
/// puts its CSRF token into every form it submits.
#[derive(Clone)]
pub struct MockBrowser {
    router: Router,
    session_id: Option<String>,
    csrf_token: Option<String>,
}

impl MockBrowser {
    /// A browser without a session.
    pub fn anonymous(router: &Router) -> Self {
        Self {
            router: router.clone(),
            session_id: None,
            csrf_token: None,
        }
    }

    /// A browser holding an existing session.
    pub fn with_session(router: &Router, session: &IssuedSession) -> Self {
        Self {
            router: router.clone(),
            session_id: Some(session.session_id.clone()),
            csrf_token: Some(session.csrf_token.as_str().to_string()),
        }
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(session_id) = &self.session_id {
            builder = builder.header(
                COOKIE,
                format!("{}={}", SESSION_COOKIE_NAME.as_str(), session_id),
            );
        }
        builder
    }

    async fn send(&self, request: Request<Body>) -> Page {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let status = response.status();
        let location = header(LOCATION);
        let set_cookie = header(SET_COOKIE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        Page {
            status,
            location,
            set_cookie,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Make a GET request to the specified path
    pub async fn get(&self, path: &str) -> Page {
        let request = self
            .request(Method::GET, path)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    /// Submit a form, adding the browser's CSRF token when it has one.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Page {
        let mut fields = fields.to_vec();
        if let Some(token) = self.csrf_token.as_deref() {
            fields.push(("csrf_token", token));
        }
        self.post_raw_form(path, &fields).await
    }

    /// Submit exactly the given fields.
    pub async fn post_raw_form(&self, path: &str, fields: &[(&str, &str)]) -> Page {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request(Method::POST, path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    /// Send a request without a body, with the CSRF token in the header if given.
    pub async fn send_with_header(&self, method: Method, path: &str, csrf: Option<&str>) -> Page {
        let mut builder = self.request(method, path);
        if let Some(token) = csrf {
            builder = builder.header("X-CSRF-Token", token);
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }
}
