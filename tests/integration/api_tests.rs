//! API integration tests for the extraction endpoint.
//!
//! Tests verify:
//! - Raw and base64 request bodies
//! - Output formats
//! - Error cases (empty body, bad base64, no EXIF, malformed EXIF)
//! - HTTP response codes and CORS headers

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use tower::ServiceExt;

use exif_streamer::exif::{ExifRegistry, ExtractOptions};
use exif_streamer::{create_router, RouterConfig};

use super::test_utils::{
    create_camera_tiff, create_minimal_tiff, plain_jpeg, wrap_in_jpeg, ByteOrderType, IfdBuilder,
    TiffBuilder,
};

fn router() -> Router {
    create_router(ExifRegistry::standard(), RouterConfig::new().with_tracing(false))
}

fn post_raw(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .body(Body::from(body))
        .unwrap()
}

fn post_base64(uri: &str, body: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(STANDARD.encode(body)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Extraction
// =============================================================================

#[tokio::test]
async fn test_extract_raw_jpeg() {
    let jpeg = wrap_in_jpeg(&create_minimal_tiff());

    let response = router().oneshot(post_raw("/exif", jpeg)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let json = json_body(response).await;
    assert_eq!(json, serde_json::json!([{ "ImageDescription": "Test" }]));
}

#[tokio::test]
async fn test_extract_base64_body() {
    let tiff = create_camera_tiff(ByteOrderType::BigEndian);

    let response = router()
        .oneshot(post_base64("/exif", &tiff))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 27);
    assert_eq!(entries[0], serde_json::json!({ "Make": "Canon" }));
}

#[tokio::test]
async fn test_extract_without_content_type_is_base64() {
    let request = Request::builder()
        .method("POST")
        .uri("/exif")
        .body(Body::from(format!(
            "{}\n",
            STANDARD.encode(create_minimal_tiff())
        )))
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_extract_names_format() {
    let tiff = create_camera_tiff(ByteOrderType::LittleEndian);

    let response = router()
        .oneshot(post_raw("/exif?format=names", tiff))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    // The thumbnail's XResolution comes last and wins
    assert_eq!(json["XResolution"], "180/1");
    assert_eq!(json["GPSLatitudeRef"], "N");
}

#[tokio::test]
async fn test_extract_paths_format() {
    let tiff = create_camera_tiff(ByteOrderType::LittleEndian);

    let response = router()
        .oneshot(post_raw("/exif?format=paths", tiff))
        .await
        .unwrap();
    let json = json_body(response).await;

    assert_eq!(json["IFD0/XResolution"], "72/1");
    assert_eq!(json["IFD1/XResolution"], "180/1");
    assert_eq!(json["IFD0/Exif0/Iop0/InteroperabilityIndex"], "R98");
}

#[tokio::test]
async fn test_extract_full_format() {
    let response = router()
        .oneshot(post_raw("/exif?format=full", create_minimal_tiff()))
        .await
        .unwrap();
    let json = json_body(response).await;

    let entry = &json[0];
    assert_eq!(entry["tag_name"], "ImageDescription");
    assert_eq!(entry["ifd_path"], "IFD");
    assert_eq!(entry["fq_ifd_path"], "IFD0");
    assert_eq!(entry["tag_id"], 0x010E);
    assert_eq!(entry["tag_type_name"], "ASCII");
    assert_eq!(entry["unit_count"], 5);
    assert_eq!(entry["value"], "Test");
}

#[tokio::test]
async fn test_extract_invalid_format_rejected() {
    let response = router()
        .oneshot(post_raw("/exif?format=xml", create_minimal_tiff()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extract_options_applied() {
    let tiff = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .short(0x0102, &[8, 8, 8, 8])
                .short(0xC4A5, &[1]),
        )
        .build();
    let options = ExtractOptions {
        max_rendered_values: Some(2),
        unknown_tags: exif_streamer::UnknownTagPolicy::Skip,
    };
    let router = create_router(
        ExifRegistry::standard(),
        RouterConfig::new()
            .with_tracing(false)
            .with_extract_options(options),
    );

    let response = router.oneshot(post_raw("/exif", tiff)).await.unwrap();
    let json = json_body(response).await;
    assert_eq!(json, serde_json::json!([{ "BitsPerSample": "8, 8, ..." }]));
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_empty_body_rejected() {
    let response = router().oneshot(post_raw("/exif", Vec::new())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "invalid_payload");
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_bad_base64_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/exif")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("this is %% not base64"))
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "invalid_payload");
}

#[tokio::test]
async fn test_no_exif() {
    let response = router()
        .oneshot(post_raw("/exif", plain_jpeg()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = json_body(response).await;
    assert_eq!(json["error"], "no_exif");
    assert_eq!(json["message"], "No EXIF found in image");
}

#[tokio::test]
async fn test_malformed_exif() {
    let tiff = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(0x0112, &[1]).with_next_offset(8))
        .build();

    let response = router().oneshot(post_raw("/exif", tiff)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = json_body(response).await;
    assert_eq!(json["error"], "malformed_exif");
}

#[tokio::test]
async fn test_body_limit() {
    let router = create_router(
        ExifRegistry::standard(),
        RouterConfig::new()
            .with_tracing(false)
            .with_max_body_bytes(64),
    );

    let response = router
        .oneshot(post_raw("/exif", vec![0u8; 1024]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_get_exif_not_allowed() {
    let request = Request::builder()
        .uri("/exif")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_any_origin() {
    let request = Request::builder()
        .method("POST")
        .uri("/exif")
        .header(header::ORIGIN, "https://example.com")
        .header(header::CONTENT_TYPE, "image/tiff")
        .body(Body::from(create_minimal_tiff()))
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
