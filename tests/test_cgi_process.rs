//! Runs a real CGI program end to end. Kept to a single test so no other
//! test in this binary forks while the script is being written.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{config_for, send, start_server, write_file};
use tiny::cgi::{ProcessSpawner, Reaper};

const ECHO_SCRIPT: &[u8] = b"#!/bin/sh\nprintf 'Content-type: text/plain\\r\\n\\r\\n%s' \"$QUERY_STRING\"\n";

#[tokio::test]
async fn test_program_output_reaches_client_and_child_is_reaped() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "cgi-bin/echo", ECHO_SCRIPT, 0o755);

    let reaper = Reaper::start();
    let spawner = ProcessSpawner::new(reaper.clone());
    let addr = start_server(config_for(dir.path()), Arc::new(spawner)).await;

    let raw = send(addr, "GET /cgi-bin/echo?num1=5&num2=3 HTTP/1.0\r\n\r\n").await;
    assert_eq!(
        String::from_utf8(raw).unwrap(),
        "HTTP/1.0 200 OK\r\nServer: Tiny Web Server\r\nConnection: close\r\n\
         Content-type: text/plain\r\n\r\nnum1=5&num2=3"
    );

    // HEAD leaves the program alone
    let raw = send(addr, "HEAD /cgi-bin/echo?x=1 HTTP/1.0\r\n\r\n").await;
    assert!(String::from_utf8(raw).unwrap().ends_with("Connection: close\r\n"));

    tokio::time::timeout(Duration::from_secs(10), async {
        while reaper.reaped() < 1 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("child was never reaped");

    assert_eq!(reaper.reaped(), 1);
    // The override lives only in the child's environment
    assert!(std::env::var("QUERY_STRING").is_err());
}
