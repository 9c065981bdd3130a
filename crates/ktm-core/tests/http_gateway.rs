//! HTTP gateway tests against an in-process fake server.
//!
//! The fake speaks the same REST surface as the real gateway: a student
//! list that may be `null`, multipart create/update, JSON error bodies and
//! stored photos served by path.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use ktm_core::table::load_records;
use ktm_core::{
    ClientConfig, HttpGateway, KtmError, PhotoAttachment, StudentGateway, StudentId,
    StudentPayload,
};

// ============================================================================
// Fake gateway
// ============================================================================

#[derive(Debug, Clone)]
struct ReceivedForm {
    method: &'static str,
    id: Option<String>,
    fields: HashMap<String, String>,
    /// (file name, content type, byte count)
    photo: Option<(String, String, usize)>,
}

#[derive(Clone, Default)]
struct Fake {
    list_body: Arc<Mutex<Value>>,
    forms: Arc<Mutex<Vec<ReceivedForm>>>,
    deleted: Arc<Mutex<Vec<String>>>,
}

async fn read_form(mut multipart: Multipart) -> (HashMap<String, String>, Option<(String, String, usize)>) {
    let mut fields = HashMap::new();
    let mut photo = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "photo" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field.bytes().await.unwrap();
            photo = Some((file_name, content_type, data.len()));
        } else {
            fields.insert(name, field.text().await.unwrap());
        }
    }
    (fields, photo)
}

async fn list(State(fake): State<Fake>) -> Json<Value> {
    Json(fake.list_body.lock().clone())
}

async fn create(State(fake): State<Fake>, multipart: Multipart) -> Json<Value> {
    let (fields, photo) = read_form(multipart).await;
    fake.forms.lock().push(ReceivedForm {
        method: "POST",
        id: None,
        fields,
        photo,
    });
    Json(json!({ "success": true, "id": 12, "photo_url": "/uploads/12_face.png" }))
}

async fn update(State(fake): State<Fake>, Path(id): Path<String>, multipart: Multipart) -> Response {
    if id == "404" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Student not found" }))).into_response();
    }
    let (fields, photo) = read_form(multipart).await;
    fake.forms.lock().push(ReceivedForm {
        method: "PUT",
        id: Some(id),
        fields,
        photo,
    });
    Json(json!({ "success": true, "photo_url": "" })).into_response()
}

async fn remove(State(fake): State<Fake>, Path(id): Path<String>) -> Response {
    match id.as_str() {
        "404" => (StatusCode::NOT_FOUND, Json(json!({ "error": "Student not found" }))).into_response(),
        "500" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => {
            fake.deleted.lock().push(id);
            Json(json!({ "success": true })).into_response()
        }
    }
}

async fn photo(Path(file): Path<String>) -> Response {
    if file != "face.png" {
        return StatusCode::NOT_FOUND.into_response();
    }
    ([(header::CONTENT_TYPE, "image/png")], sample_png(30, 40)).into_response()
}

async fn spawn_fake(fake: Fake) -> String {
    let app = Router::new()
        .route("/students", get(list).post(create))
        .route("/students/{id}", put(update).delete(remove))
        .route("/uploads/{file}", get(photo))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn gateway_for(url: &str) -> HttpGateway {
    HttpGateway::new(&ClientConfig::default().with_gateway_url(url)).unwrap()
}

fn payload() -> StudentPayload {
    StudentPayload {
        nim: "50421001".to_string(),
        name: "Ilham Nur".to_string(),
        faculty: "EKONOMI".to_string(),
        major: "S1 - MANAJEMEN".to_string(),
        photo: None,
    }
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_null_list_is_empty() {
    let fake = Fake::default();
    let url = spawn_fake(fake).await;

    let records = gateway_for(&url).list_students().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_list_parses_records() {
    let fake = Fake::default();
    *fake.list_body.lock() = json!([
        { "id": 1, "nim": "50421001", "name": "Ilham Nur", "faculty": "EKONOMI",
          "major": "S1 - MANAJEMEN", "photo_url": "/uploads/face.png" },
        { "id": 2, "nim": "10119002", "name": "Sari Dewi", "faculty": "PSIKOLOGI",
          "major": "S1 - PSIKOLOGI", "photo_url": "" }
    ]);
    let url = spawn_fake(fake).await;

    let records = gateway_for(&url).list_students().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, StudentId::from(1));
    assert_eq!(records[0].photo_url.as_deref(), Some("/uploads/face.png"));
    assert_eq!(records[1].photo_url, None);
}

// ============================================================================
// Create / update
// ============================================================================

#[tokio::test]
async fn test_create_sends_multipart_with_photo() {
    let fake = Fake::default();
    let url = spawn_fake(fake.clone()).await;

    let mut payload = payload();
    payload.photo = Some(PhotoAttachment::new("face.png", sample_png(8, 8)));

    let ack = gateway_for(&url).create_student(&payload).await.unwrap();
    assert_eq!(ack.id, Some(StudentId::from(12)));
    assert_eq!(ack.photo_url.as_deref(), Some("/uploads/12_face.png"));

    let forms = fake.forms.lock().clone();
    assert_eq!(forms.len(), 1);
    let form = &forms[0];
    assert_eq!(form.method, "POST");
    assert_eq!(form.fields["nim"], "50421001");
    assert_eq!(form.fields["name"], "Ilham Nur");
    assert_eq!(form.fields["faculty"], "EKONOMI");
    assert_eq!(form.fields["major"], "S1 - MANAJEMEN");

    let (file_name, content_type, len) = form.photo.clone().unwrap();
    assert_eq!(file_name, "face.png");
    assert_eq!(content_type, "image/png");
    assert!(len > 0);
}

#[tokio::test]
async fn test_update_without_photo_omits_part() {
    let fake = Fake::default();
    let url = spawn_fake(fake.clone()).await;

    let ack = gateway_for(&url)
        .update_student(&StudentId::from(7), &payload())
        .await
        .unwrap();
    assert_eq!(ack.photo_url, None);

    let forms = fake.forms.lock().clone();
    assert_eq!(forms[0].method, "PUT");
    assert_eq!(forms[0].id.as_deref(), Some("7"));
    assert!(forms[0].photo.is_none());
}

#[tokio::test]
async fn test_update_error_body_is_surfaced() {
    let url = spawn_fake(Fake::default()).await;

    let err = gateway_for(&url)
        .update_student(&StudentId::from(404), &payload())
        .await
        .unwrap_err();

    match err {
        KtmError::Gateway { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Student not found");
        }
        other => panic!("expected gateway error, got {:?}", other),
    }
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_hits_record_path() {
    let fake = Fake::default();
    let url = spawn_fake(fake.clone()).await;

    gateway_for(&url)
        .delete_student(&StudentId::from(3))
        .await
        .unwrap();
    assert_eq!(fake.deleted.lock().clone(), vec!["3".to_string()]);
}

#[tokio::test]
async fn test_delete_plain_error_uses_status() {
    let url = spawn_fake(Fake::default()).await;

    let err = gateway_for(&url)
        .delete_student(&StudentId::from(500))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "HTTP error! status: 500");
}

// ============================================================================
// Photos
// ============================================================================

#[tokio::test]
async fn test_fetch_photo_resolves_relative_path() {
    let url = spawn_fake(Fake::default()).await;
    let gateway = gateway_for(&url);

    let bytes = gateway.fetch_photo("//uploads//face.png").await.unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (30, 40));

    assert_eq!(
        gateway.photo_location("/uploads/face.png").as_deref(),
        Some(format!("{}/uploads/face.png", url).as_str())
    );
}

#[tokio::test]
async fn test_missing_photo_is_error() {
    let url = spawn_fake(Fake::default()).await;
    let result = gateway_for(&url).fetch_photo("/uploads/gone.png").await;
    assert!(result.is_err());
}

// ============================================================================
// Unreachable gateway
// ============================================================================

#[tokio::test]
async fn test_unreachable_gateway_lists_nothing() {
    // Grab a free port, then close it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = gateway_for(&format!("http://{}", addr));
    assert!(matches!(
        gateway.list_students().await,
        Err(KtmError::Transport(_))
    ));
    assert!(load_records(&gateway).await.is_empty());
}
