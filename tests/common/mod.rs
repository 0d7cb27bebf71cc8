pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Send a raw HTTP request and read until the server goes quiet.
    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Split a raw response into status, headers (lowercase names) and body.
    pub fn parse_response(resp: &str) -> (u16, Vec<(String, String)>, String) {
        let (head, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut lines = head.lines();
        let status = lines
            .next()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let headers = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect();
        (status, headers, body.to_string())
    }

    pub fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub mod test_server {
    use gooday::server::{AppService, HttpServer, ServerHandle};
    use gooday::Router;
    use std::net::{SocketAddr, TcpListener};
    use std::sync::{Arc, Once};

    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Serve `router` on an ephemeral local port.
    pub fn start(router: Router) -> (ServerHandle, SocketAddr) {
        setup_may_runtime();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let handle = HttpServer(AppService::new(Arc::new(router)))
            .start(addr)
            .unwrap();
        handle.wait_ready().unwrap();
        (handle, addr)
    }
}
