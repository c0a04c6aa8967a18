use super::*;

const BOUNDARY: &str = "depot-test-boundary";

/// One multipart part: field name, optional file name and content type, and content.
struct Part<'a> {
    name: &'a str,
    file: Option<(&'a str, &'a str)>,
    content: &'a [u8],
}

fn field<'a>(name: &'a str, value: &'a str) -> Part<'a> {
    Part {
        name,
        file: None,
        content: value.as_bytes(),
    }
}

fn file<'a>(name: &'a str, file_name: &'a str, mime: &'a str, content: &'a [u8]) -> Part<'a> {
    Part {
        name,
        file: Some((file_name, mime)),
        content,
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file {
            Some((file_name, mime)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: {}\r\n\r\n",
                    part.name, file_name, mime
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                    .as_bytes(),
            ),
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn upload(
    app: &Router,
    uri: &str,
    token: &str,
    parts: &[Part<'_>],
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Tests a single upload with a blank category.
///
/// Expected: 201 with the category defaulted to `delivery_document` and the tags parsed
#[tokio::test]
async fn uploads_with_default_category() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let engineer = token_for(db, UserRole::Engineer).await;

    let (status, body) = upload(
        &app,
        "/api/files/upload",
        &engineer,
        &[
            file("file", "waybill.pdf", "application/pdf", b"%PDF-1.4"),
            field("category", " "),
            field("tags", r#"["march"]"#),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["category"], "delivery_document");
    assert_eq!(body["data"]["original_name"], "waybill.pdf");
    assert_eq!(body["data"]["tags"], json!(["march"]));
}

/// Tests upload rejections at the HTTP boundary.
///
/// Expected: 400 for a disallowed type and for a form without a file, 403 for a contractor
#[tokio::test]
async fn rejects_invalid_uploads() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let engineer = token_for(db, UserRole::Engineer).await;
    let contractor = token_for(db, UserRole::Contractor).await;

    let (status, _) = upload(
        &app,
        "/api/files/upload",
        &engineer,
        &[file("file", "stock.csv", "text/csv", b"a,b")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = upload(
        &app,
        "/api/files/upload",
        &engineer,
        &[field("description", "no file here")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    let (status, _) = upload(
        &app,
        "/api/files/upload",
        &contractor,
        &[file("file", "waybill.pdf", "application/pdf", b"%PDF-1.4")],
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// Tests a batch upload followed by preview and download of one of its files.
///
/// Expected: 201 with both files sharing the description; preview inline, download as
/// an attachment
#[tokio::test]
async fn batch_upload_then_preview_and_download() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let engineer = token_for(db, UserRole::Engineer).await;

    let (status, body) = upload(
        &app,
        "/api/files/upload/multiple",
        &engineer,
        &[
            file("files", "front.png", "image/png", b"front"),
            file("files", "back.png", "image/png", b"back"),
            field("category", "request_document"),
            field("description", "site photos"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let files = body["data"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f["description"] == "site photos"));
    assert!(files.iter().all(|f| f["category"] == "request_document"));

    let id = files[0]["id"].as_i64().unwrap();
    let fetch = |suffix: &'static str| {
        Request::builder()
            .uri(format!("/api/files/{}/{}", id, suffix))
            .header(header::AUTHORIZATION, format!("Bearer {}", engineer))
            .body(Body::empty())
            .unwrap()
    };

    let preview = app.clone().oneshot(fetch("preview")).await.unwrap();
    assert_eq!(preview.status(), StatusCode::OK);
    assert_eq!(preview.headers()[header::CONTENT_TYPE], "image/png");
    assert!(preview.headers().get(header::CONTENT_DISPOSITION).is_none());
    let bytes = preview.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"front");

    let download = app.clone().oneshot(fetch("download")).await.unwrap();
    assert_eq!(download.status(), StatusCode::OK);
    let disposition = download.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
}

/// Tests a batch request without any `files` part.
///
/// Expected: 400
#[tokio::test]
async fn batch_upload_requires_files() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let engineer = token_for(db, UserRole::Engineer).await;

    let (status, _) = upload(
        &app,
        "/api/files/upload/multiple",
        &engineer,
        &[file("file", "front.png", "image/png", b"front")],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
