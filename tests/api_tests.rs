use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use media_vault::services::auth;
use media_vault::web::{build_router, AppState};
use media_vault::{Config, Database};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const TEST_PASSWORD: &str = "Password123";
const BOUNDARY: &str = "media-vault-test-boundary";

struct TestApp {
    router: Router,
    db: Database,
    uploads: TempDir,
}

fn create_test_app() -> TestApp {
    use rand::Rng;
    let id: u32 = rand::thread_rng().gen();
    let db = Database::open_memory(&format!("api_test_db_{}", id))
        .expect("Failed to create test database");
    db.migrate().expect("Failed to run migrations");

    let uploads = tempfile::tempdir().expect("Failed to create upload dir");
    let mut config = Config::with_secret("api-test-secret");
    config.media.upload_dir = uploads.path().to_string_lossy().into_owned();
    config.media.max_upload_size = "1KB".to_string();

    let state = AppState::new(config, db.clone()).expect("Failed to build state");
    TestApp {
        router: build_router(Arc::new(state)),
        db,
        uploads,
    }
}

impl TestApp {
    async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, value)
    }

    async fn register(&self, email: &str, username: &str) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/register",
                None,
                Some(json!({ "email": email, "username": username, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }

    async fn login(&self, email: &str) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/login",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body
    }

    async fn access_token(&self, email: &str, username: &str) -> (String, String) {
        let account = self.register(email, username).await;
        let tokens = self.login(email).await;
        (
            account["id"].as_str().unwrap().to_string(),
            tokens["access"].as_str().unwrap().to_string(),
        )
    }

    async fn upload(
        &self,
        uri: &str,
        token: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: {ct}\r\n\r\n",
                b = BOUNDARY,
                f = filename,
                ct = content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        let request = Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

mod account_api_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_returns_public_fields() {
        let app = create_test_app();

        let body = app.register("alice@example.com", "alice").await;
        assert_eq!(body["email"], "alice@example.com");
        assert_eq!(body["username"], "alice");
        assert_eq!(body["is_superuser"], false);
        assert!(body.get("password_hash").is_none());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = create_test_app();
        app.register("dup@example.com", "first").await;

        let (status, body) = app
            .request(
                Method::POST,
                "/register",
                None,
                Some(json!({ "email": "dup@example.com", "username": "second", "password": "x" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert!(body["fields"]["email"].is_array());
    }

    #[tokio::test]
    async fn test_register_invalid_input() {
        let app = create_test_app();

        let (status, body) = app
            .request(
                Method::POST,
                "/register",
                None,
                Some(json!({ "email": "not-an-email", "username": "", "password": "" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["fields"]["email"].is_array());
        assert!(body["fields"]["username"].is_array());
        assert!(body["fields"]["password"].is_array());
    }

    #[tokio::test]
    async fn test_register_malformed_json() {
        let app = create_test_app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_login_returns_token_pair() {
        let app = create_test_app();
        app.register("login@example.com", "login").await;

        let body = app.login("login@example.com").await;
        assert!(body["access"].is_string());
        assert!(body["refresh"].is_string());
        assert_eq!(body["admin"], false);
    }

    #[tokio::test]
    async fn test_login_admin_flag() {
        let app = create_test_app();
        auth::create_admin_account(&app.db, "root@example.com", "root", TEST_PASSWORD).unwrap();

        let body = app.login("root@example.com").await;
        assert_eq!(body["admin"], true);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = create_test_app();
        app.register("login@example.com", "login").await;

        let (status, _) = app
            .request(
                Method::POST,
                "/login",
                None,
                Some(json!({ "email": "login@example.com", "password": "nope" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_refresh() {
        let app = create_test_app();
        app.register("r@example.com", "r").await;
        let tokens = app.login("r@example.com").await;

        let (status, body) = app
            .request(
                Method::POST,
                "/token/refresh",
                None,
                Some(json!({ "refresh": tokens["refresh"] })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let access = body["access"].as_str().unwrap();

        let (status, _) = app
            .request(Method::GET, "/user-profiles", Some(access), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        // An access token is not accepted for refresh
        let (status, _) = app
            .request(
                Method::POST,
                "/token/refresh",
                None,
                Some(json!({ "refresh": tokens["access"] })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profiles_require_authentication() {
        let app = create_test_app();

        let (status, body) = app.request(Method::GET, "/user-profiles", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");

        let (status, _) = app
            .request(Method::GET, "/user-profiles", Some("garbage"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_and_get_profiles() {
        let app = create_test_app();
        let (id, token) = app.access_token("a@example.com", "a").await;
        app.register("b@example.com", "b").await;

        let (status, body) = app
            .request(Method::GET, "/user-profiles", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = app
            .request(Method::GET, &format!("/user-profile/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "a");
    }

    #[tokio::test]
    async fn test_update_own_profile() {
        let app = create_test_app();
        let (id, token) = app.access_token("a@example.com", "a").await;

        let (status, body) = app
            .request(
                Method::PUT,
                &format!("/user-profile/{}", id),
                Some(&token),
                Some(json!({ "first_name": "Ada" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first_name"], "Ada");
    }

    #[tokio::test]
    async fn test_cannot_modify_another_profile() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;
        let other = app.register("b@example.com", "b").await;
        let other_uri = format!("/user-profile/{}", other["id"].as_str().unwrap());

        let (status, body) = app
            .request(
                Method::PUT,
                &other_uri,
                Some(&token),
                Some(json!({ "first_name": "Mallory" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");

        let (status, _) = app.request(Method::DELETE, &other_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_superuser_can_delete_any_profile() {
        let app = create_test_app();
        auth::create_admin_account(&app.db, "root@example.com", "root", TEST_PASSWORD).unwrap();
        let admin_token = app.login("root@example.com").await["access"]
            .as_str()
            .unwrap()
            .to_string();
        let other = app.register("b@example.com", "b").await;
        let other_uri = format!("/user-profile/{}", other["id"].as_str().unwrap());

        let (status, _) = app
            .request(Method::DELETE, &other_uri, Some(&admin_token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .request(Method::GET, &other_uri, Some(&admin_token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleted_account_token_rejected() {
        let app = create_test_app();
        let (id, token) = app.access_token("a@example.com", "a").await;

        let (status, _) = app
            .request(Method::DELETE, &format!("/user-profile/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .request(Method::GET, "/user-profiles", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (status, body) = app
            .request(Method::GET, "/user-profile/42", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, body) = app.request(Method::GET, "/tags/not-a-uuid", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}

mod tag_api_tests {
    use super::*;

    #[tokio::test]
    async fn test_tag_crud() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (status, tag) = app
            .request(Method::POST, "/tags", Some(&token), Some(json!({ "name": "sunset" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(tag["description"], "sunset");
        let uri = format!("/tags/{}", tag["id"].as_str().unwrap());

        let (status, body) = app.request(Method::GET, "/tags", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = app
            .request(
                Method::PUT,
                &uri,
                Some(&token),
                Some(json!({ "description": "Golden hour" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], "Golden hour");

        let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app.request(Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_tag_writes_require_token() {
        let app = create_test_app();

        let (status, _) = app
            .request(Method::POST, "/tags", None, Some(json!({ "name": "sunset" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_tag_rejected() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        app.request(Method::POST, "/tags", Some(&token), Some(json!({ "name": "x" })))
            .await;
        let (status, body) = app
            .request(Method::POST, "/tags", Some(&token), Some(json!({ "name": "x" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["fields"]["name"].is_array());
    }

    #[tokio::test]
    async fn test_tag_prefix_filter() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        for name in ["sun", "sunset", "moon"] {
            app.request(Method::POST, "/tags", Some(&token), Some(json!({ "name": name })))
                .await;
        }

        let (status, body) = app.request(Method::GET, "/tags?prefix=sun", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}

mod media_api_tests {
    use super::*;

    async fn create_tag(app: &TestApp, token: &str, name: &str) -> String {
        let (status, tag) = app
            .request(Method::POST, "/tags", Some(token), Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        tag["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_photo_crud_with_tags() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;
        let sunset = create_tag(&app, &token, "sunset").await;

        let (status, photo) = app
            .request(
                Method::POST,
                "/photos",
                Some(&token),
                Some(json!({ "title": "Evening", "tags": [sunset] })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(photo["title"], "Evening");
        assert_eq!(photo["description"], "");
        assert_eq!(photo["tags"][0]["name"], "sunset");
        let uri = format!("/photos/{}", photo["id"].as_str().unwrap());

        let (status, body) = app.request(Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], photo["id"]);

        let (status, body) = app
            .request(Method::PUT, &uri, Some(&token), Some(json!({ "tags": [] })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["tags"].as_array().unwrap().is_empty());

        let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app.request(Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_media_writes_require_token() {
        let app = create_test_app();

        let (status, _) = app
            .request(Method::POST, "/videos", None, Some(json!({ "title": "Clip" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_filter_by_tag() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;
        let sunset = create_tag(&app, &token, "sunset").await;

        for (title, tags) in [("A", vec![sunset.clone()]), ("B", vec![sunset.clone()]), ("C", vec![])] {
            app.request(
                Method::POST,
                "/photos",
                Some(&token),
                Some(json!({ "title": title, "tags": tags })),
            )
            .await;
        }

        let (_, all) = app.request(Method::GET, "/photos", None, None).await;
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (status, tagged) = app.request(Method::GET, "/photos?tag=sunset", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tagged.as_array().unwrap().len(), 2);

        let (_, videos) = app.request(Method::GET, "/videos?tag=sunset", None, None).await;
        assert!(videos.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tag_id_is_not_found() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (status, _) = app
            .request(
                Method::POST,
                "/videos",
                Some(&token),
                Some(json!({ "title": "Clip", "tags": [uuid::Uuid::new_v4()] })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_replaces_file() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (_, photo) = app
            .request(Method::POST, "/photos", Some(&token), Some(json!({ "title": "P" })))
            .await;
        let uri = format!("/photos/{}/file", photo["id"].as_str().unwrap());

        let (status, body) = app
            .upload(&uri, &token, "first.png", "image/png", b"first")
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let first = body["file"].as_str().unwrap().to_string();
        assert!(first.starts_with("photos/"));
        assert!(app.uploads.path().join(&first).exists());

        let (status, body) = app
            .upload(&uri, &token, "second.png", "image/png", b"second")
            .await;
        assert_eq!(status, StatusCode::OK);
        let second = body["file"].as_str().unwrap().to_string();
        assert_ne!(first, second);
        assert!(app.uploads.path().join(&second).exists());
        assert!(!app.uploads.path().join(&first).exists());
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_type() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (_, photo) = app
            .request(Method::POST, "/photos", Some(&token), Some(json!({ "title": "P" })))
            .await;
        let uri = format!("/photos/{}/file", photo["id"].as_str().unwrap());

        let (status, body) = app
            .upload(&uri, &token, "clip.mp4", "video/mp4", b"data")
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["fields"]["file"].is_array());
    }

    #[tokio::test]
    async fn test_upload_to_missing_item() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let uri = format!("/videos/{}/file", uuid::Uuid::new_v4());
        let (status, _) = app
            .upload(&uri, &token, "clip.mp4", "video/mp4", b"data")
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_file_reference_cannot_be_set_through_json() {
        let app = create_test_app();
        let (_, alice) = app.access_token("alice@example.com", "alice").await;
        let (_, mallory) = app.access_token("mallory@example.com", "mallory").await;

        let (_, photo) = app
            .request(Method::POST, "/photos", Some(&alice), Some(json!({ "title": "Mine" })))
            .await;
        let alice_uri = format!("/photos/{}", photo["id"].as_str().unwrap());
        let (_, body) = app
            .upload(&format!("{}/file", alice_uri), &alice, "mine.png", "image/png", b"png")
            .await;
        let reference = body["file"].as_str().unwrap().to_string();
        let stored = app.uploads.path().join(&reference);

        let (status, copy) = app
            .request(
                Method::POST,
                "/photos",
                Some(&mallory),
                Some(json!({ "title": "Copy", "file": reference })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(copy["file"].is_null());
        let copy_uri = format!("/photos/{}", copy["id"].as_str().unwrap());

        let (status, updated) = app
            .request(Method::PUT, &copy_uri, Some(&mallory), Some(json!({ "file": reference })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(updated["file"].is_null());

        let (status, _) = app.request(Method::DELETE, &copy_uri, Some(&mallory), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert!(stored.exists());
        let (_, body) = app.request(Method::GET, &alice_uri, None, None).await;
        assert_eq!(body["file"], reference.as_str());
    }

    #[tokio::test]
    async fn test_remove_file() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (_, photo) = app
            .request(Method::POST, "/photos", Some(&token), Some(json!({ "title": "P" })))
            .await;
        let uri = format!("/photos/{}/file", photo["id"].as_str().unwrap());
        let (_, body) = app.upload(&uri, &token, "p.png", "image/png", b"png").await;
        let stored = app.uploads.path().join(body["file"].as_str().unwrap());

        let (status, _) = app.request(Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(stored.exists());

        let (status, body) = app.request(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["file"].is_null());
        assert!(!stored.exists());
    }

    #[tokio::test]
    async fn test_oversize_upload_is_payload_too_large() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (_, photo) = app
            .request(Method::POST, "/photos", Some(&token), Some(json!({ "title": "P" })))
            .await;
        let uri = format!("/photos/{}/file", photo["id"].as_str().unwrap());

        let data = vec![0u8; 70_000];
        let (status, body) = app.upload(&uri, &token, "big.png", "image/png", &data).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "payload_too_large");
    }

    #[tokio::test]
    async fn test_delete_removes_uploaded_file() {
        let app = create_test_app();
        let (_, token) = app.access_token("a@example.com", "a").await;

        let (_, video) = app
            .request(Method::POST, "/videos", Some(&token), Some(json!({ "title": "V" })))
            .await;
        let id = video["id"].as_str().unwrap();

        let (_, body) = app
            .upload(&format!("/videos/{}/file", id), &token, "clip.mp4", "video/mp4", b"data")
            .await;
        let stored = app.uploads.path().join(body["file"].as_str().unwrap());
        assert!(stored.exists());

        let (status, _) = app
            .request(Method::DELETE, &format!("/videos/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(!stored.exists());
    }
}

mod misc_api_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let app = create_test_app();

        let (status, body) = app.request(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let app = create_test_app();

        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["cache-control"], "no-store");
    }
}
