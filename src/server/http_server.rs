use super::service::AppService;
use may::coroutine::JoinHandle;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Wrapper around may_minihttp's HTTP server.
pub struct HttpServer(pub AppService);

/// Handle to a running HTTP server
///
/// Provides methods for waiting until the server is ready, stopping it,
/// or joining the server coroutine.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server is bound to.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server to accept connections
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the server doesn't become ready within ~250ms (50 attempts × 5ms).
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Cancel the server coroutine and wait for it to finish.
    pub fn stop(self) {
        // SAFETY: cancel() is unsafe in may because a cancelled coroutine unwinds at its
        // next yield point. The accept loop holds no locks or borrowed state across
        // yields, and this handle is consumed so the coroutine is never touched again.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
    }

    /// Block until the server coroutine completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl HttpServer {
    /// Start the HTTP server on the given address
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the port cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let routes = self.0.router.routes().len();
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        info!(addr = %addr, routes_count = routes, "HTTP server started");
        Ok(ServerHandle { addr, handle })
    }
}
