//! API integration tests for image uploads and error handling.
//!
//! Tests verify:
//! - Metadata extraction from multipart uploads
//! - Error cases (missing image field, malformed body, oversized upload)
//! - HTTP response codes and JSON bodies

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use exif_probe::{create_router, ByteOrder, RouterConfig};

use super::test_utils::{
    camera_jpeg, camera_tiff, create_test_jpeg, insert_exif, multipart_body, upload_request, Part,
    BOUNDARY,
};

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let router = create_router(RouterConfig::default());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Successful Uploads
// =============================================================================

#[tokio::test]
async fn test_upload_extracts_exif() {
    let router = create_router(RouterConfig::default());
    let jpeg = camera_jpeg(ByteOrder::LittleEndian);
    let body = multipart_body(&[Part::file("image", "IMG_0001.JPG", "image/jpeg", &jpeg)]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let metadata = &json["metadata"];
    assert_eq!(metadata["fileName"], "IMG_0001.JPG");
    assert_eq!(metadata["fileType"], "image/jpeg");
    assert_eq!(metadata["Make"], "Canon");
    assert_eq!(metadata["Model"], "Canon EOS 5D Mark IV");
    assert_eq!(metadata["exposureTime"], "1/250 sec");
    assert_eq!(metadata["aperture"], "f/2.8");
    assert_eq!(metadata["iso"], 400);
    assert!(metadata["lastModified"].is_string());
}

#[tokio::test]
async fn test_upload_real_jpeg_reports_dimensions() {
    let router = create_router(RouterConfig::default());
    let jpeg = insert_exif(
        &create_test_jpeg(40, 30),
        &camera_tiff(ByteOrder::BigEndian),
    );
    let body = multipart_body(&[Part::file("image", "real.jpg", "image/jpeg", &jpeg)]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["metadata"]["dimensions"], "40 × 30");
    assert_eq!(json["metadata"]["resolution"], "40 × 30 pixels");
    assert_eq!(json["metadata"]["focalLength"], "50.0 mm");
}

#[tokio::test]
async fn test_upload_without_exif() {
    let router = create_router(RouterConfig::default());
    let body = multipart_body(&[Part::file(
        "image",
        "notes.txt",
        "text/plain",
        b"hello, world",
    )]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let metadata = json["metadata"].as_object().unwrap();
    assert_eq!(metadata["fileName"], "notes.txt");
    assert_eq!(metadata["fileType"], "text/plain");
    assert_eq!(metadata["fileSize"], "0.01 KB");
    assert!(!metadata.contains_key("Make"));
    assert!(!metadata.contains_key("dimensions"));
}

#[tokio::test]
async fn test_other_fields_ignored() {
    let router = create_router(RouterConfig::default());
    let jpeg = camera_jpeg(ByteOrder::BigEndian);
    let body = multipart_body(&[
        Part::text("caption", "sunset"),
        Part::file("thumbnail", "thumb.jpg", "image/jpeg", b"\xFF\xD8\xFF\xD9"),
        Part::file("image", "sunset.jpg", "image/jpeg", &jpeg),
    ]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["metadata"]["fileName"], "sunset.jpg");
    assert_eq!(json["metadata"]["Make"], "Canon");
}

#[tokio::test]
async fn test_upload_without_file_name() {
    let router = create_router(RouterConfig::default());
    let body = multipart_body(&[Part::text("image", "plain field")]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["metadata"]["fileName"], "upload");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_missing_image_field() {
    let router = create_router(RouterConfig::default());
    let body = multipart_body(&[Part::text("caption", "no file here")]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "missing_image");
    assert_eq!(json["message"], "No image file provided");
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_non_multipart_request() {
    let router = create_router(RouterConfig::default());

    let request = Request::builder()
        .method("POST")
        .uri("/api/exif")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"image\": \"photo.jpg\"}"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_truncated_multipart_body() {
    let router = create_router(RouterConfig::default());
    let jpeg = camera_jpeg(ByteOrder::LittleEndian);
    let mut body = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"cut.jpg\"\r\n\r\n",
        BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(&jpeg[..jpeg.len() / 2]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_too_large() {
    let router = create_router(RouterConfig::default().with_max_upload_bytes(1024));
    let data = vec![0xAB; 8 * 1024];
    let body = multipart_body(&[Part::file("image", "big.jpg", "image/jpeg", &data)]);

    let response = router.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_wrong_method() {
    let router = create_router(RouterConfig::default());

    let request = Request::builder()
        .uri("/api/exif")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route() {
    let router = create_router(RouterConfig::default());

    let request = Request::builder()
        .uri("/api/unknown")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
