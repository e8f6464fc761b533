use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::controller::{ControllerEvent, FetchController};
use crate::fetcher::{self, FetchError, FetchOptions};
use crate::store::RecordStore;

struct MockApi {
    url: String,
    hits: Arc<AtomicUsize>,
    last_request: Arc<Mutex<String>>,
}

// a tiny canned-response HTTP server; every accepted connection counts as
// one API hit
async fn spawn_mock_api(status_line: &'static str, body: String) -> MockApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(Mutex::new(String::new()));

    let task_hits = hits.clone();
    let task_last = last_request.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            task_hits.fetch_add(1, Ordering::SeqCst);
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            *task_last.lock().await = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    MockApi {
        url: format!("http://{addr}/api/"),
        hits,
        last_request,
    }
}

// a server that accepts and then goes silent, for timeout coverage
async fn spawn_stalled_api() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            held.push(socket);
        }
    });
    format!("http://{addr}/api/")
}

fn sample_body() -> String {
    r#"{
  "results": [
    {
      "gender": "female",
      "name": {"title": "Miss", "first": "Jennie", "last": "Nichols"},
      "location": {
        "street": {"number": 8929, "name": "Valwood Pkwy"},
        "city": "Billings",
        "state": "Michigan",
        "country": "United States",
        "postcode": 63104
      },
      "email": "jennie.nichols@example.com",
      "phone": "(272) 790-0888",
      "cell": "(489) 330-2385",
      "picture": {"large": "https://example.com/jennie.jpg", "medium": "", "thumbnail": ""},
      "nat": "US"
    },
    {
      "gender": "male",
      "name": {"title": "Mr", "first": "Alfred", "last": "Hughes"},
      "location": {
        "street": {"number": 12, "name": "Gower St"},
        "city": "London",
        "state": "Greater London",
        "country": "United Kingdom",
        "postcode": "EC1A 1BB"
      },
      "email": "alfred.hughes@example.com",
      "phone": "016977 2428",
      "cell": "0700-326-137",
      "picture": {"large": "https://example.com/alfred.jpg", "medium": "", "thumbnail": ""},
      "nat": "GB"
    }
  ],
  "info": {"seed": "56d27f4a53bd5441", "results": 2, "page": 1, "version": "1.4"}
}"#
    .to_string()
}

fn options_for(url: &str) -> FetchOptions {
    FetchOptions {
        api_url: url.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn fetch_parses_records_and_issues_one_request() {
    let api = spawn_mock_api("HTTP/1.1 200 OK", sample_body()).await;
    let options = options_for(&api.url);
    let client = fetcher::build_client(&options).unwrap();

    let records = fetcher::fetch_records(&client, &options, 2).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].full_name(), "Miss Jennie Nichols");
    assert_eq!(records[0].location.postcode, "63104");
    assert_eq!(records[1].location.postcode, "EC1A 1BB");
    assert_eq!(api.hits.load(Ordering::SeqCst), 1);
    let request = api.last_request.lock().await.clone();
    assert!(request.starts_with("GET /api/?results=2"));
}

#[tokio::test]
async fn non_success_status_surfaces_with_its_code() {
    let api = spawn_mock_api("HTTP/1.1 500 Internal Server Error", String::new()).await;
    let options = options_for(&api.url);
    let client = fetcher::build_client(&options).unwrap();

    let err = fetcher::fetch_records(&client, &options, 5).await.unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 500 }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let api = spawn_mock_api("HTTP/1.1 200 OK", "this is not json".to_string()).await;
    let options = options_for(&api.url);
    let client = fetcher::build_client(&options).unwrap();

    let err = fetcher::fetch_records(&client, &options, 5).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    // bind to grab a free port, then drop the listener so nothing answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let options = options_for(&format!("http://{addr}/api/"));
    let client = fetcher::build_client(&options).unwrap();

    let err = fetcher::fetch_records(&client, &options, 5).await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
}

#[tokio::test(start_paused = true)]
async fn stalled_server_times_out_after_the_configured_window() {
    let url = spawn_stalled_api().await;
    let options = FetchOptions {
        api_url: url,
        timeout_seconds: 10,
        ..Default::default()
    };
    let client = fetcher::build_client(&options).unwrap();

    let err = fetcher::fetch_records(&client, &options, 5).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { seconds: 10 }));
}

#[tokio::test]
async fn debounced_inputs_issue_one_request_for_the_last_value() {
    let api = spawn_mock_api("HTTP/1.1 200 OK", sample_body()).await;
    let (mut controller, mut events) =
        FetchController::new(options_for(&api.url)).unwrap();

    // two inputs inside the window: only the second survives
    controller.on_input_changed("50", Duration::from_millis(500));
    tokio::time::sleep(Duration::from_millis(50)).await;
    controller.on_input_changed("75", Duration::from_millis(500));

    assert!(matches!(
        events.recv().await.unwrap(),
        ControllerEvent::LoadingStarted
    ));
    assert!(matches!(
        events.recv().await.unwrap(),
        ControllerEvent::LoadingFinished
    ));
    match events.recv().await.unwrap() {
        ControllerEvent::Loaded(records) => assert_eq!(records.len(), 2),
        other => panic!("unexpected event: {other:?}"),
    }

    assert_eq!(api.hits.load(Ordering::SeqCst), 1);
    let request = api.last_request.lock().await.clone();
    assert!(request.starts_with("GET /api/?results=75"));
}

#[tokio::test]
async fn controller_events_drive_the_store_lifecycle() {
    let api = spawn_mock_api("HTTP/1.1 200 OK", sample_body()).await;
    let (controller, mut events) = FetchController::new(options_for(&api.url)).unwrap();
    let mut store = RecordStore::new();

    controller.request_records(2).await;
    while let Ok(event) = events.try_recv() {
        match event {
            ControllerEvent::Loaded(records) => store.replace(records),
            ControllerEvent::Cleared => store.clear(),
            _ => {}
        }
    }
    assert_eq!(store.len(), 2);

    // a zero-count request empties the table without another API hit
    controller.request_records(0).await;
    while let Ok(event) = events.try_recv() {
        match event {
            ControllerEvent::Loaded(records) => store.replace(records),
            ControllerEvent::Cleared => store.clear(),
            _ => {}
        }
    }
    assert!(store.is_empty());
    assert_eq!(api.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_fetch_leaves_previous_records_untouched() {
    let ok_api = spawn_mock_api("HTTP/1.1 200 OK", sample_body()).await;
    let (controller, mut events) = FetchController::new(options_for(&ok_api.url)).unwrap();
    let mut store = RecordStore::new();

    controller.request_records(2).await;
    while let Ok(event) = events.try_recv() {
        if let ControllerEvent::Loaded(records) = event {
            store.replace(records);
        }
    }
    assert_eq!(store.len(), 2);

    let bad_api = spawn_mock_api("HTTP/1.1 503 Service Unavailable", String::new()).await;
    let (bad_controller, mut bad_events) =
        FetchController::new(options_for(&bad_api.url)).unwrap();
    bad_controller.request_records(2).await;

    let mut failure = None;
    while let Ok(event) = bad_events.try_recv() {
        match event {
            ControllerEvent::Failed(err) => failure = Some(err),
            ControllerEvent::Loaded(records) => store.replace(records),
            ControllerEvent::Cleared => store.clear(),
            _ => {}
        }
    }
    assert!(matches!(
        failure,
        Some(FetchError::HttpStatus { status: 503 })
    ));
    // the error is surfaced, the table is not
    assert_eq!(store.len(), 2);
}
