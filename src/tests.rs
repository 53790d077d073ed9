//! Integration tests for the portfolio server.

use std::path::Path;
use std::sync::Arc;

use reqwest::{redirect::Policy, Client, Response};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::search::SearchIndex;
use crate::{create_router, AppState};

const ADMIN_KEY: &str = "test-admin-key";

fn test_config(dir: &Path, psk: Option<String>) -> Config {
    Config {
        admin_psk: psk,
        session_secret: "test-session-secret".to_string(),
        db_path: dir.join("test.sqlite"),
        index_path: dir.join("index"),
        uploads_dir: dir.join("uploads"),
        static_dir: dir.join("static"),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    /// Sends the admin key on every request; never follows redirects
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_psk(Some(ADMIN_KEY.to_string())).await
    }

    async fn with_psk(psk: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = test_config(temp_dir.path(), psk.clone());

        let pool = init_database(&config.db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));
        let search = Arc::new(SearchIndex::open(&config.index_path).expect("Failed to init search"));

        let app = create_router(AppState::new(repo, search, config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut client_builder = Client::builder().redirect(Policy::none());
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    async fn post_json(&self, path: &str, body: Value) -> Response {
        self.client.post(self.url(path)).json(&body).send().await.unwrap()
    }

    async fn put_json(&self, path: &str, body: Value) -> Response {
        self.client.put(self.url(path)).json(&body).send().await.unwrap()
    }

    async fn create_author(&self) -> String {
        self.create_author_named("author@example.com").await
    }

    async fn create_author_named(&self, email: &str) -> String {
        let resp = self
            .post_json("/api/admin/users", json!({ "email": email, "name": "Author" }))
            .await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn create_post(&self, author_id: &str, slug: &str, status: &str) -> String {
        let resp = self
            .post_json(
                "/api/admin/posts",
                json!({ "slug": slug, "status": status, "authorId": author_id }),
            )
            .await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn translate(&self, post_id: &str, language: &str, body: Value) {
        let resp = self
            .put_json(
                &format!("/api/admin/posts/{}/translations/{}", post_id, language),
                body,
            )
            .await;
        assert_eq!(resp.status(), 200);
    }

    /// Published `hello-world` with an Italian translation at `ciao-mondo`.
    async fn seed_hello_world(&self) -> String {
        let author_id = self.create_author().await;
        let post_id = self.create_post(&author_id, "hello-world", "published").await;
        self.translate(
            &post_id,
            "en",
            json!({
                "title": "Hello world",
                "abstract": "A first post",
                "content": "# Hello\n\n![me](static/me.png)"
            }),
        )
        .await;
        self.translate(
            &post_id,
            "it",
            json!({
                "title": "Ciao mondo",
                "abstract": "Un primo articolo",
                "content": "# Ciao\n\nBenvenuti nel mondo",
                "localizedSlug": "ciao-mondo"
            }),
        )
        .await;
        post_id
    }
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` part of the session `Set-Cookie` header.
fn session_cookie(resp: &Response) -> String {
    let header = resp.headers().get("set-cookie").unwrap().to_str().unwrap();
    header.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture.get("/health").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

// ==================== LANGUAGE ROUTING ====================

#[tokio::test]
async fn test_root_redirects_to_accept_language() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/"))
        .header("accept-language", "it-IT,it;q=0.9,en;q=0.5")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/it");

    let resp = fixture.get("/").await;
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/en");
}

#[tokio::test]
async fn test_root_prefers_session_locale() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post_json("/api/theme", json!({ "theme": "light", "locale": "en" }))
        .await;
    let cookie = session_cookie(&resp);

    let resp = fixture
        .client
        .get(fixture.url("/"))
        .header("cookie", cookie)
        .header("accept-language", "it")
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/en");
}

#[tokio::test]
async fn test_unsupported_language_root_redirects() {
    let fixture = TestFixture::new().await;

    for path in ["/fr", "/fr/"] {
        let resp = fixture.get(path).await;
        assert_eq!(resp.status(), 302, "{}", path);
        assert_eq!(location(&resp), "/");
    }
}

#[tokio::test]
async fn test_unsupported_language_deep_path_is_not_found() {
    let fixture = TestFixture::new().await;

    let resp = fixture.get("/fr/anything").await;
    assert_eq!(resp.status(), 404);
    let html = resp.text().await.unwrap();
    assert!(html.contains("This page does not exist."));
}

#[tokio::test]
async fn test_home_pages() {
    let fixture = TestFixture::new().await;

    let resp = fixture.get("/en").await;
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("<html lang=\"en\""));

    let resp = fixture.get("/it/").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("<html lang=\"it\""));
    assert!(html.contains("href=\"/it/contatti\""));
}

#[tokio::test]
async fn test_route_pages_use_localized_slugs() {
    let fixture = TestFixture::new().await;

    let resp = fixture.get("/en/contact").await;
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("action=\"/api/contact\""));

    let resp = fixture.get("/it/contatti").await;
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("Contatti"));

    // Slugs of another language are not accepted.
    assert_eq!(fixture.get("/en/contatti").await.status(), 404);
    assert_eq!(fixture.get("/it/contact").await.status(), 404);
    assert_eq!(fixture.get("/en/nowhere").await.status(), 404);
}

#[tokio::test]
async fn test_italian_error_page() {
    let fixture = TestFixture::new().await;

    let resp = fixture.get("/it/nessuna-pagina").await;
    assert_eq!(resp.status(), 404);
    assert!(resp.text().await.unwrap().contains("Questa pagina non esiste."));
}

// ==================== ARTICLES ====================

#[tokio::test]
async fn test_article_canonical_redirect() {
    let fixture = TestFixture::new().await;
    fixture.seed_hello_world().await;

    let resp = fixture.get("/it/blog/hello-world").await;
    assert_eq!(resp.status(), 301);
    assert_eq!(location(&resp), "/it/blog/ciao-mondo");

    let resp = fixture.get("/it/blog/ciao-mondo").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Ciao mondo"));
    assert!(html.contains("hreflang=\"en\" href=\"/en/blog/hello-world\""));
}

#[tokio::test]
async fn test_untranslated_article_redirects_to_default_slug() {
    let fixture = TestFixture::new().await;
    let author_id = fixture.create_author().await;
    let post_id = fixture.create_post(&author_id, "english-only", "published").await;
    fixture
        .translate(
            &post_id,
            "en",
            json!({ "title": "Only in English", "content": "text", "localizedSlug": "only-english" }),
        )
        .await;

    let resp = fixture.get("/it/blog/english-only").await;
    assert_eq!(resp.status(), 301);
    assert_eq!(location(&resp), "/it/blog/only-english");

    let resp = fixture.get("/it/blog/only-english").await;
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("Only in English"));
}

#[tokio::test]
async fn test_article_renders_markdown() {
    let fixture = TestFixture::new().await;
    fixture.seed_hello_world().await;

    let resp = fixture.get("/en/blog/hello-world").await;
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("<h1>Hello</h1>"));
    assert!(html.contains("src=\"/static/me.png\""));
}

#[tokio::test]
async fn test_unpublished_and_missing_articles_are_not_found() {
    let fixture = TestFixture::new().await;
    let author_id = fixture.create_author().await;
    let draft_id = fixture.create_post(&author_id, "work-in-progress", "draft").await;
    fixture
        .translate(&draft_id, "en", json!({ "title": "WIP", "content": "soon" }))
        .await;

    assert_eq!(fixture.get("/en/blog/work-in-progress").await.status(), 404);
    assert_eq!(fixture.get("/en/blog/never-written").await.status(), 404);
}

#[tokio::test]
async fn test_blog_index_lists_published_posts() {
    let fixture = TestFixture::new().await;
    fixture.seed_hello_world().await;

    let html = fixture.get("/it/blog").await.text().await.unwrap();
    assert!(html.contains("href=\"/it/blog/ciao-mondo\""));

    let html = fixture.get("/en/blog").await.text().await.unwrap();
    assert!(html.contains("Hello world"));
}

// ==================== SESSION ====================

#[tokio::test]
async fn test_theme_cookie() {
    let fixture = TestFixture::new().await;

    let resp = fixture.post_json("/api/theme", json!({ "theme": "dark" })).await;
    assert_eq!(resp.status(), 200);
    let set_cookie = resp.headers().get("set-cookie").unwrap().to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("__session="));
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = session_cookie(&resp);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["theme"], "dark");

    let resp = fixture
        .client
        .get(fixture.url("/en"))
        .header("cookie", cookie)
        .send()
        .await
        .unwrap();
    assert!(resp.text().await.unwrap().contains("data-theme=\"dark\""));
}

#[tokio::test]
async fn test_tampered_cookie_is_ignored() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/en"))
        .header("cookie", "__session=7b7d.deadbeef")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("data-theme=\"system\""));
}

#[tokio::test]
async fn test_invalid_theme_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture.post_json("/api/theme", json!({ "theme": "neon" })).await;
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_language_switch() {
    let fixture = TestFixture::new().await;
    fixture.seed_hello_world().await;

    let cases = [
        ("contatti", "it", "en", "/en/contact"),
        ("", "en", "it", "/it"),
        ("blog", "en", "it", "/it/blog"),
        ("blog/ciao-mondo", "it", "en", "/en/blog/hello-world"),
        ("blog/hello-world", "en", "it", "/it/blog/ciao-mondo"),
        ("blog/missing", "en", "it", "/it/blog"),
    ];
    for (slug, language, target, expected) in cases {
        let resp = fixture
            .get(&format!(
                "/api/language-switch?slug={}&language={}&target={}",
                slug, language, target
            ))
            .await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("set-cookie").is_some());
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["url"], expected, "switching {:?}", slug);
    }

    let resp = fixture
        .get("/api/language-switch?slug=&language=en&target=fr")
        .await;
    assert_eq!(resp.status(), 400);
}

// ==================== SEARCH ====================

#[tokio::test]
async fn test_search_by_language() {
    let fixture = TestFixture::new().await;
    fixture.seed_hello_world().await;

    let resp = fixture.get("/api/search?q=mondo&language=it").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["results"][0]["url"], "/it/blog/ciao-mondo");

    let body: Value = fixture
        .get("/api/search?q=mondo&language=en")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_search_paging_bounds() {
    let fixture = TestFixture::new().await;
    fixture.seed_hello_world().await;

    let resp = fixture.get("/api/search?q=hello&limit=0").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["total"], 1);
    assert!(body["data"]["results"].as_array().unwrap().is_empty());

    let resp = fixture
        .get("/api/search?q=hello&offset=18446744073709551615")
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["total"], 1);
    assert!(body["data"]["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_total_spans_pages() {
    let fixture = TestFixture::new().await;
    let author_id = fixture.create_author().await;
    for slug in ["notes-one", "notes-two", "notes-three"] {
        let post_id = fixture.create_post(&author_id, slug, "published").await;
        fixture
            .translate(&post_id, "en", json!({ "title": "Field notes", "content": "notes" }))
            .await;
    }

    let body: Value = fixture
        .get("/api/search?q=notes&limit=1")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["total"], 3);
}

#[tokio::test]
async fn test_search_falls_back_to_default_language() {
    let fixture = TestFixture::new().await;
    let author_id = fixture.create_author().await;
    let post_id = fixture.create_post(&author_id, "english-only", "published").await;
    fixture
        .translate(
            &post_id,
            "en",
            json!({ "title": "Compilers", "content": "parsing", "localizedSlug": "only-english" }),
        )
        .await;

    let body: Value = fixture
        .get("/api/search?q=compilers&language=it")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["total"], 1);
    let url = body["data"]["results"][0]["url"].as_str().unwrap();
    assert_eq!(url, "/it/blog/only-english");
    assert_eq!(fixture.get(url).await.status(), 200);
}

// ==================== CONTACT ====================

#[tokio::test]
async fn test_contact_field_errors_are_inline() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post_json(
            "/api/contact",
            json!({ "name": "", "email": "nope", "message": "hi" }),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["accepted"], false);
    for field in ["name", "email", "message"] {
        assert!(body["data"]["fieldErrors"][field].is_string(), "{}", field);
    }
}

#[tokio::test]
async fn test_contact_message_stored() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post_json(
            "/api/contact",
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "message": "I would like to work with you."
            }),
        )
        .await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["accepted"], true);

    let body: Value = fixture.get("/api/admin/contact").await.json().await.unwrap();
    let messages = body["data"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_contact_accepts_plain_form_post() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .form(&[
            ("name", "Grace"),
            ("email", "grace@example.com"),
            ("message", "Sent without any script running."),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["accepted"], true);

    let resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .header("content-type", "text/plain")
        .body("name=Grace")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

// ==================== ADMIN ====================

#[tokio::test]
async fn test_duplicate_user_email_conflicts() {
    let fixture = TestFixture::new().await;
    fixture.create_author().await;

    let resp = fixture
        .post_json(
            "/api/admin/users",
            json!({ "email": "Author@Example.com", "name": "Someone else" }),
        )
        .await;
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_user_validation() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post_json("/api/admin/users", json!({ "email": "bad", "name": "X" }))
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_post_slug_validation_and_conflicts() {
    let fixture = TestFixture::new().await;
    let author_id = fixture.create_author().await;

    let resp = fixture
        .post_json(
            "/api/admin/posts",
            json!({ "slug": "Not A Slug", "authorId": author_id }),
        )
        .await;
    assert_eq!(resp.status(), 400);

    fixture.create_post(&author_id, "taken", "draft").await;
    let resp = fixture
        .post_json("/api/admin/posts", json!({ "slug": "taken", "authorId": author_id }))
        .await;
    assert_eq!(resp.status(), 409);

    let resp = fixture
        .put_json(
            "/api/admin/posts/missing/translations/en",
            json!({ "title": "T", "content": "c" }),
        )
        .await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_list_posts_includes_drafts() {
    let fixture = TestFixture::new().await;
    fixture.seed_hello_world().await;
    let author_id = fixture.create_author_named("second@example.com").await;
    fixture.create_post(&author_id, "draft-post", "draft").await;

    let body: Value = fixture.get("/api/admin/posts").await.json().await.unwrap();
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    let hello = posts.iter().find(|p| p["slug"] == "hello-world").unwrap();
    assert_eq!(hello["translations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_gallery_upload_list_delete() {
    let fixture = TestFixture::new().await;
    let bytes = vec![0x89, b'P', b'N', b'G', 1, 2, 3];

    let resp = fixture
        .client
        .put(fixture.url("/api/admin/gallery/photo.png"))
        .body(bytes.clone())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["url"], "/uploads/photo.png");

    let body: Value = fixture.get("/api/admin/gallery").await.json().await.unwrap();
    assert_eq!(body["data"][0]["name"], "photo.png");
    assert_eq!(body["data"][0]["size"], 7);

    let resp = fixture.get("/uploads/photo.png").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.bytes().await.unwrap().to_vec(), bytes);

    let resp = fixture
        .client
        .delete(fixture.url("/api/admin/gallery/photo.png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .delete(fixture.url("/api/admin/gallery/photo.png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_gallery_rejects_non_images() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/admin/gallery/payload.html"))
        .body("<script></script>")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_experience_config() {
    let fixture = TestFixture::new().await;

    let body: Value = fixture.get("/api/experience").await.json().await.unwrap();
    assert_eq!(body["data"]["pages"], 4);
    assert_eq!(body["data"]["sections"].as_array().unwrap().len(), 4);
    assert!(body["data"]["sections"][0]["camera"]["lookAt"].is_array());
}

#[tokio::test]
async fn test_experience_scene() {
    let fixture = TestFixture::new().await;
    let config: Value = fixture.get("/api/experience").await.json().await.unwrap();
    let sections = &config["data"]["sections"];

    let body: Value = fixture
        .get("/api/experience/scene?progress=0.6")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["activeSection"], 2);
    assert_eq!(body["data"]["animating"], true);
    assert_eq!(body["data"]["scene"], sections[0]);
    assert_eq!(body["data"]["target"], sections[2]);

    let body: Value = fixture
        .get("/api/experience/scene?progress=0.6&elapsed=5")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["animating"], false);
    assert_eq!(body["data"]["scene"], body["data"]["target"]);

    let body: Value = fixture
        .get("/api/experience/scene?progress=0.9&from=3&elapsed=0.5")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["activeSection"], 3);
    assert_eq!(body["data"]["animating"], false);

    let body: Value = fixture
        .get("/api/experience/scene?progress=0.6&elapsed=0.5&paused=true")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["activeSection"], 2);
    assert_eq!(body["data"]["animating"], false);
    assert_eq!(body["data"]["scene"], sections[0]);

    let resp = fixture.get("/api/experience/scene?progress=0.5&from=9").await;
    assert_eq!(resp.status(), 400);
}

// ==================== AUTH ====================

#[tokio::test]
async fn test_admin_requires_key() {
    let fixture = TestFixture::new().await;
    let anonymous = Client::new();

    let resp = anonymous
        .get(fixture.url("/api/admin/posts"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let resp = anonymous
        .get(fixture.url("/api/admin/posts"))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = anonymous
        .get(fixture.url("/api/admin/posts"))
        .bearer_auth(ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_public_api_needs_no_key() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .get(fixture.url("/api/experience"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_admin_open_without_psk() {
    let fixture = TestFixture::with_psk(None).await;

    let resp = fixture.get("/api/admin/posts").await;
    assert_eq!(resp.status(), 200);
}
