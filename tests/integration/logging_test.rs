//! Request logging must not capture tokens carried in query strings.

use std::io;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use uuid::Uuid;

use userhub_auth::token::VerificationPayload;

use crate::helpers::TestApp;

/// Writer collecting formatted log lines in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_verification_token_absent_from_request_logs() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = TestApp::new();
    let user_id = app.register_ada().await;
    let token = app
        .codec
        .issue(&VerificationPayload {
            id: Uuid::parse_str(&user_id).unwrap(),
            user: "ada@example.com".to_string(),
        })
        .unwrap();

    let response = app
        .request("GET", &format!("/auth/verify-email?token={token}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let output = logs.contents();
    assert!(output.contains("/auth/verify-email"));
    assert!(!output.contains(&token));
    assert!(!output.contains("token="));
}
