//! Tests for the static page loader against a throwaway local HTTP server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use docbrowser::services::static_page::{PageState, StaticPageLoader, StaticPageRequest};
use docbrowser::types::document::{DocParent, StaticPageDoc};
use docbrowser::types::errors::PageError;
use serde_json::json;

/// Serves `(path, status, body)` routes on an ephemeral port; anything else is a 404.
fn serve(routes: Vec<(&'static str, u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let request = String::from_utf8_lossy(&request);
            let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (status, body) = routes
                .iter()
                .find(|(p, _, _)| *p == path)
                .map(|(_, s, b)| (*s, b.clone()))
                .unwrap_or((404, "no such page".to_string()));
            let reason = if status == 200 { "OK" } else { "Not Found" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}", addr)
}

fn about_body() -> String {
    json!({
        "hyData": {
            "id": "about",
            "title": "About MDN",
            "sections": ["<h2 id=\"team\">Team</h2>", "<p>Hello</p>"],
            "toc": [{"id": "team", "text": "Team"}]
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_load_ready_page() {
    let base = serve(vec![("/en-US/about/index.json", 200, about_body())]);
    let loader = StaticPageLoader::new(&base, "MDN");
    let mut request = StaticPageRequest::new("en-US", "about");
    request.parents.push(DocParent {
        uri: "/en-US/".to_string(),
        title: "MDN".to_string(),
    });

    match loader.load(&request).await {
        PageState::Ready(view) => {
            assert_eq!(view.id, "about");
            assert_eq!(view.document_title, "About MDN | MDN");
            assert_eq!(view.sections.len(), 2);
            assert_eq!(view.toc.as_ref().map(Vec::len), Some(1));
            let crumbs: Vec<&str> = view.breadcrumbs.iter().map(|p| p.uri.as_str()).collect();
            assert_eq!(crumbs, vec!["/en-US/", "/en-US/about"]);
        }
        other => panic!("expected a ready page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_ok_status_is_not_found() {
    let base = serve(vec![]);
    let loader = StaticPageLoader::new(&base, "MDN");
    let request = StaticPageRequest::new("en-US", "missing");

    let err = loader.fetch(&request).await.unwrap_err();
    match err {
        PageError::NotFound(msg) => {
            assert_eq!(
                msg,
                format!("404 on {}/en-US/missing/index.json: no such page", base)
            );
        }
        other => panic!("expected NotFound, got {:?}", other),
    }

    assert!(matches!(loader.load(&request).await, PageState::NotFound(_)));
}

#[tokio::test]
async fn test_bad_payload_is_invalid_response_and_not_found_state() {
    let base = serve(vec![("/en-US/broken/index.json", 200, "{\"oops\": 1}".to_string())]);
    let loader = StaticPageLoader::new(&base, "MDN");
    let request = StaticPageRequest::new("en-US", "broken");

    assert!(matches!(
        loader.fetch(&request).await,
        Err(PageError::InvalidResponse(_))
    ));
    match loader.load(&request).await {
        PageState::NotFound(msg) => assert!(msg.starts_with("Invalid page response")),
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let loader = StaticPageLoader::new(&format!("http://127.0.0.1:{}", port), "MDN");
    let request = StaticPageRequest::new("en-US", "about");
    assert!(matches!(
        loader.fetch(&request).await,
        Err(PageError::NetworkError(_))
    ));
}

#[tokio::test]
async fn test_fallback_skips_the_network() {
    let loader = StaticPageLoader::new("http://127.0.0.1:1", "MDN");
    let mut request = StaticPageRequest::new("de", "plus");
    request.fallback = Some(StaticPageDoc {
        id: "plus".to_string(),
        title: "Plus".to_string(),
        sections: vec![],
        toc: vec![],
    });

    match loader.load(&request).await {
        PageState::Ready(view) => {
            assert_eq!(view.document_title, "Plus | MDN");
            assert!(view.toc.is_none());
            assert_eq!(view.breadcrumbs[0].uri, "/de/plus");
        }
        other => panic!("expected a ready page, got {:?}", other),
    }
}
