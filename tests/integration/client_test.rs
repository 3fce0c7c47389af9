// HTTP client tests against a one-shot local server

use std::net::SocketAddr;
use std::time::Duration;

use solar_guardian::core::solar::{HttpSolarClient, SolarDataSource};
use solar_guardian::SolarError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const SAMPLE_BODY: &str = r#"{
    "flares": [
        {"time_tag": "2023-08-25T10:00:00Z", "flux": 3.1e-6, "energy": "0.1-0.8nm", "classification": "C"},
        {"time_tag": "2023-08-25T10:05:00Z", "flux": 2.3e-5, "energy": "0.1-0.8nm"}
    ],
    "geomagnetic": [
        {"time_tag": "2023-08-25T09:00:00Z", "kp_index": 4.33, "storm_level": "G0"}
    ],
    "last_updated": "2023-08-25T10:05:30Z",
    "alerts": ["Strong solar flare detected"]
}"#;

/// Serve a single canned HTTP response and return the listening address.
async fn serve_once(status_line: &'static str, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request_head(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    addr
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&request).into_owned()
}

fn client_for(addr: SocketAddr, timeout: Duration) -> HttpSolarClient {
    HttpSolarClient::new(&format!("http://{}/", addr), timeout).unwrap()
}

#[tokio::test]
async fn test_fetch_decodes_payload() {
    let addr = serve_once("200 OK", SAMPLE_BODY.to_string()).await;
    let client = client_for(addr, Duration::from_secs(5));

    let snapshot = client.fetch().await.unwrap();

    assert_eq!(snapshot.flares.len(), 2);
    assert_eq!(snapshot.flares[1].flux, 2.3e-5);
    assert_eq!(snapshot.flares[1].classification, None);
    assert_eq!(snapshot.geomagnetic[0].kp_index, 4.33);
    assert_eq!(snapshot.last_updated, "2023-08-25T10:05:30Z");
    assert_eq!(snapshot.alerts, vec!["Strong solar flare detected"]);
}

#[tokio::test]
async fn test_fetch_hits_solar_data_path() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let head = read_request_head(&mut socket).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            SAMPLE_BODY.len(),
            SAMPLE_BODY
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        head
    });

    let client = client_for(addr, Duration::from_secs(5));
    client.fetch().await.unwrap();

    let head = server.await.unwrap();
    assert!(head.starts_with("GET /api/solar-data HTTP/1.1"), "{}", head);
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let addr = serve_once("503 Service Unavailable", "upstream feed down".to_string()).await;
    let client = client_for(addr, Duration::from_secs(5));

    match client.fetch().await {
        Err(SolarError::Server { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("upstream feed down"));
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let addr = serve_once("200 OK", r#"{"flares": [], "alerts": []}"#.to_string()).await;
    let client = client_for(addr, Duration::from_secs(5));

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, SolarError::MalformedPayload(_)), "{:?}", err);
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, Duration::from_secs(5));
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, SolarError::Network(_)), "{:?}", err);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request_head(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let client = client_for(addr, Duration::from_millis(300));
    let err = client.fetch().await.unwrap_err();
    assert_eq!(err.to_string(), "Network error: request timed out");
}
