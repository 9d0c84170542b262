//! Integration tests for the single-link and folder pipelines.
//!
//! A single mock server plays the folder page, the info endpoint, and the
//! stream host.

use videoloader_core::{
    DriveClient, HttpClient, ItemOutcome, Orchestrator, RunError, RunOptions,
};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an info response body whose stream map points back at the mock server.
fn info_body(server: &MockServer, id: &str) -> String {
    let stream_url = format!("{}/videoplayback?id={id}", server.uri());
    format!(
        "status=ok&title=Video%20{id}&fmt_stream_map=18%7C{}&length_seconds=3",
        urlencoding::encode(&stream_url)
    )
}

async fn mount_info(server: &MockServer, id: &str) {
    mount_info_body(server, id, info_body(server, id)).await;
}

async fn mount_info_body(server: &MockServer, id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/u/0/get_video_info"))
        .and(query_param("docid", id))
        .and(query_param("drive_originator_app", "303"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_stream(server: &MockServer, id: &str) {
    mount_stream_response(
        server,
        id,
        ResponseTemplate::new(200).set_body_bytes(format!("bytes of {id}")),
    )
    .await;
}

async fn mount_stream_response(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/videoplayback"))
        .and(query_param("id", id))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_folder(server: &MockServer, folder: &str, page: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/drive/folders/{folder}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(page.to_string()))
        .mount(server)
        .await;
}

fn orchestrator(server: &MockServer, options: RunOptions) -> Orchestrator {
    Orchestrator::new(
        DriveClient::with_base_url(server.uri()).unwrap(),
        HttpClient::new().unwrap(),
        options,
    )
}

fn options_in(dir: &TempDir) -> RunOptions {
    RunOptions {
        output_dir: dir.path().to_path_buf(),
        ..RunOptions::default()
    }
}

async fn stream_request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == "/videoplayback")
        .count()
}

#[tokio::test]
async fn test_folder_with_three_valid_ids_downloads_three_files() {
    let server = MockServer::start().await;
    let ids = ["alphaVideo1", "betaVideo22", "gammaVideo3"];
    Mock::given(method("GET"))
        .and(path("/drive/folders/folder123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div data-id="alphaVideo1"></div>
               <div data-id="abc"></div>
               <div data-id="betaVideo22"></div>
               <div data-id='gammaVideo3'></div>
               <div data-id="alphaVideo1"></div>"#,
        ))
        .mount(&server)
        .await;
    for id in ids {
        mount_info(&server, id).await;
        mount_stream(&server, id).await;
    }

    let out = TempDir::new().unwrap();
    let summary = orchestrator(&server, options_in(&out))
        .run(&format!("{}/drive/folders/folder123", server.uri()))
        .await
        .unwrap();

    assert_eq!(stream_request_count(&server).await, 3);
    assert_eq!(summary.completed(), 3);
    assert_eq!(summary.total(), 3);
    for id in ids {
        let saved = std::fs::read(out.path().join(format!("Video {id}"))).unwrap();
        assert_eq!(saved, format!("bytes of {id}").into_bytes());
    }
}

#[tokio::test]
async fn test_folder_ids_sharing_a_title_get_separate_files() {
    let server = MockServer::start().await;
    mount_folder(&server, "twins", r#"data-id="first1" data-id="second2""#).await;
    for id in ["first1", "second2"] {
        let stream_url = format!("{}/videoplayback?id={id}", server.uri());
        let body = format!(
            "title=clip.mp4&fmt_stream_map=18%7C{}",
            urlencoding::encode(&stream_url)
        );
        mount_info_body(&server, id, body).await;
    }
    mount_stream_response(
        &server,
        "first1",
        ResponseTemplate::new(200).set_body_bytes(b"AAAAAAAAAA".to_vec()),
    )
    .await;
    mount_stream_response(
        &server,
        "second2",
        ResponseTemplate::new(200).set_body_bytes(b"BBBBBBBBBBBBBBBBBBBB".to_vec()),
    )
    .await;

    let out = TempDir::new().unwrap();
    let summary = orchestrator(&server, options_in(&out))
        .run(&format!("{}/drive/folders/twins", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.completed(), 2);
    assert_eq!(
        std::fs::read(out.path().join("clip.mp4")).unwrap(),
        b"AAAAAAAAAA"
    );
    assert_eq!(
        std::fs::read(out.path().join("second2")).unwrap(),
        b"BBBBBBBBBBBBBBBBBBBB"
    );
    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .filter(|request| request.url.path() == "/videoplayback")
            .all(|request| request.headers.get("range").is_none()),
        "no stream request should resume another id's file"
    );
}

#[tokio::test]
async fn test_folder_continues_after_stream_status_error() {
    let server = MockServer::start().await;
    mount_folder(&server, "denied", r#"data-id="deniedId1" data-id="allowedId2""#).await;
    mount_info(&server, "deniedId1").await;
    mount_info(&server, "allowedId2").await;
    mount_stream_response(&server, "deniedId1", ResponseTemplate::new(403)).await;
    mount_stream(&server, "allowedId2").await;

    let out = TempDir::new().unwrap();
    let summary = orchestrator(&server, options_in(&out))
        .run(&format!("{}/drive/folders/denied", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.completed(), 1);
    assert!(!out.path().join("Video deniedId1").exists());
    assert_eq!(
        std::fs::read(out.path().join("Video allowedId2")).unwrap(),
        b"bytes of allowedId2"
    );
}

#[tokio::test]
async fn test_folder_page_fetch_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/folders/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let url = format!("{}/drive/folders/gone", server.uri());
    let result = orchestrator(&server, options_in(&out)).run(&url).await;

    match result {
        Err(RunError::Folder { url: failed, .. }) => assert_eq!(failed, url),
        other => panic!("expected folder error, got {other:?}"),
    }
    assert_eq!(stream_request_count(&server).await, 0);
}

#[tokio::test]
async fn test_folder_skips_id_whose_info_fetch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/folders/mixed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"data-id="brokenId01" data-id="workingId2""#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/u/0/get_video_info"))
        .and(query_param("docid", "brokenId01"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_info(&server, "workingId2").await;
    mount_stream(&server, "workingId2").await;

    let out = TempDir::new().unwrap();
    let summary = orchestrator(&server, options_in(&out))
        .run(&format!("{}/drive/folders/mixed", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.completed(), 1);
    assert!(out.path().join("Video workingId2").exists());
}

#[tokio::test]
async fn test_folder_with_no_ids_downloads_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/folders/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let summary = orchestrator(&server, options_in(&out))
        .run(&format!("{}/drive/folders/empty", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.total(), 0);
    assert_eq!(stream_request_count(&server).await, 0);
}

#[tokio::test]
async fn test_folder_output_override_is_used_as_directory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/folders/dirtest"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"data-id="onlyVideo1""#))
        .mount(&server)
        .await;
    mount_info(&server, "onlyVideo1").await;
    mount_stream(&server, "onlyVideo1").await;

    let out = TempDir::new().unwrap();
    let target_dir = out.path().join("videos");
    let options = RunOptions {
        output: Some(target_dir.clone()),
        ..options_in(&out)
    };
    let summary = orchestrator(&server, options)
        .run(&format!("{}/drive/folders/dirtest", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.completed(), 1);
    assert!(target_dir.join("Video onlyVideo1").is_file());
}

#[tokio::test]
async fn test_single_share_link_resolves_id_and_downloads_by_title() {
    let server = MockServer::start().await;
    mount_info(&server, "shareId123").await;
    mount_stream(&server, "shareId123").await;

    let out = TempDir::new().unwrap();
    let summary = orchestrator(&server, options_in(&out))
        .run("https://drive.google.com/file/d/shareId123/view?usp=sharing")
        .await
        .unwrap();

    assert_eq!(summary.completed(), 1);
    assert_eq!(
        std::fs::read(out.path().join("Video shareId123")).unwrap(),
        b"bytes of shareId123"
    );
}

#[tokio::test]
async fn test_single_output_override_is_used_as_file_path() {
    let server = MockServer::start().await;
    mount_info(&server, "rawId4567").await;
    mount_stream(&server, "rawId4567").await;

    let out = TempDir::new().unwrap();
    let target = out.path().join("custom.mp4");
    let options = RunOptions {
        output: Some(target.clone()),
        ..options_in(&out)
    };
    orchestrator(&server, options).run("rawId4567").await.unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), b"bytes of rawId4567");
}

#[tokio::test]
async fn test_single_info_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/u/0/get_video_info"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let result = orchestrator(&server, options_in(&out)).run("someId99").await;

    match result {
        Err(RunError::Fetch { id, .. }) => assert_eq!(id, "someId99"),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_stream_url_skips_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/u/0/get_video_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("status=fail&reason=Video%20unavailable&title=Gone"),
        )
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let summary = orchestrator(&server, options_in(&out))
        .run("goneId123")
        .await
        .unwrap();

    assert_eq!(summary.no_stream(), 1);
    assert_eq!(summary.completed(), 0);
    assert_eq!(stream_request_count(&server).await, 0);
}

#[tokio::test]
async fn test_info_cookies_are_sent_with_stream_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/u/0/get_video_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "DRIVE_STREAM=s3cr3t; Path=/")
                .set_body_string(info_body(&server, "cookieId1")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videoplayback"))
        .and(header("cookie", "DRIVE_STREAM=s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let orchestrator = orchestrator(&server, options_in(&out));
    let outcome = orchestrator
        .process_identifier("cookieId1", out.path(), None)
        .await
        .unwrap();

    assert!(matches!(outcome, ItemOutcome::Downloaded(_)));
}
