//! Peer chain fetcher over HTTP.
//!
//! Talks to another node's `GET /api/v1/chain/` route and expects the same
//! JSON the local node serves:
//!
//! ```json
//! { "chain": [ { "index": 1, ... } ], "length": 1 }
//! ```

use std::time::Duration;

use reqwest::blocking::Client;

use super::{ChainFetcher, ChainSnapshot, FetchError};

/// Route a peer serves its chain on.
pub const CHAIN_PATH: &str = "/api/v1/chain/";

/// Blocking HTTP fetcher.
///
/// Uses the blocking `reqwest` client, so it must be driven from a plain
/// thread (e.g. `web::block`) rather than from inside an async task.
pub struct HttpChainFetcher {
    client: Client,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn chain_url(peer: &str) -> String {
    format!("http://{}{}", peer.trim_end_matches('/'), CHAIN_PATH)
}

impl ChainFetcher for HttpChainFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, FetchError> {
        let url = chain_url(peer);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Unreachable {
                peer: peer.to_string(),
                reason: format!("GET {url} failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Unreachable {
                peer: peer.to_string(),
                reason: format!("HTTP status {status}"),
            });
        }

        resp.json::<ChainSnapshot>()
            .map_err(|e| FetchError::Malformed {
                peer: peer.to_string(),
                reason: format!("failed to parse chain JSON: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Block;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request on an ephemeral port with `status` and `body`.
    fn serve_once(status: &str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephem");
        let addr = listener.local_addr().expect("local addr").to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        addr
    }

    fn fetcher() -> HttpChainFetcher {
        HttpChainFetcher::new(Duration::from_secs(2)).expect("client")
    }

    #[test]
    fn builds_chain_url() {
        assert_eq!(
            chain_url("127.0.0.1:5000"),
            "http://127.0.0.1:5000/api/v1/chain/"
        );
    }

    #[test]
    fn closed_port_is_unreachable() {
        // Grab a free port and release it so nothing is listening there.
        let port = TcpListener::bind("127.0.0.1:0")
            .expect("bind ephem")
            .local_addr()
            .expect("local addr")
            .port();

        let fetcher = HttpChainFetcher::new(Duration::from_millis(500)).expect("client");
        let res = fetcher.fetch_chain(&format!("127.0.0.1:{port}"));
        assert!(matches!(res, Err(FetchError::Unreachable { .. })));
    }

    #[test]
    fn parses_served_chain() {
        let served = ChainSnapshot::new(vec![Block::genesis()]);
        let peer = serve_once("200 OK", serde_json::to_string(&served).expect("serialize"));

        let snapshot = fetcher().fetch_chain(&peer).expect("fetch");
        assert_eq!(snapshot.length, 1);
        assert_eq!(snapshot.chain.len(), 1);
        assert_eq!(snapshot.chain[0].index, 1);
        assert_eq!(snapshot.chain[0].previous_hash, "1");
        assert_eq!(snapshot.chain[0].proof, 100);
    }

    #[test]
    fn server_error_is_unreachable() {
        let peer = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#.to_string());
        let res = fetcher().fetch_chain(&peer);
        assert!(matches!(res, Err(FetchError::Unreachable { .. })), "{res:?}");
    }

    #[test]
    fn non_json_body_is_malformed() {
        let peer = serve_once("200 OK", "<html>not a chain</html>".to_string());
        let res = fetcher().fetch_chain(&peer);
        assert!(matches!(res, Err(FetchError::Malformed { .. })), "{res:?}");
    }
}
