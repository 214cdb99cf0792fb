//! Serve a [`reqparam::App`] with [`hyper`].
//!
//! Besides moving requests in and out of hyper, the transport reads
//! `multipart/*` bodies and hands them to the app as a parsed
//! [`Multipart`](reqparam::extract::Multipart), which is where file and
//! part parameters are resolved from.
//!
//! ```no_run
//! use reqparam::App;
//! use reqparam_hyper::Serve;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! App::new()
//!     .get("/", |_: ()| async { "hello" })
//!     .serve("127.0.0.1:3000")?
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod multipart;

mod service;

pub use service::{AppMakeService, AppService};

use std::io;
use std::net::ToSocketAddrs;

use hyper::server::conn::AddrIncoming;
use reqparam::App;

pub use hyper::Server;

/// Serve an [`App`] over HTTP.
pub trait Serve {
    /// Bind a server to the first address `addr` resolves to.
    fn serve(self, addr: impl ToSocketAddrs) -> io::Result<Server<AddrIncoming, AppMakeService>>;

    /// Convert the app into a hyper `MakeService`.
    fn into_make_service(self) -> AppMakeService;

    /// Convert the app into a hyper `Service`.
    fn into_service(self) -> AppService;
}

impl Serve for App {
    fn serve(self, addr: impl ToSocketAddrs) -> io::Result<Server<AddrIncoming, AppMakeService>> {
        let addr = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "could not resolve to any address")
        })?;

        let incoming =
            AddrIncoming::bind(&addr).map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

        tracing::info!(%addr, "listening");
        Ok(Server::builder(incoming).serve(self.into_make_service()))
    }

    fn into_make_service(self) -> AppMakeService {
        AppMakeService::new(self.into_service())
    }

    fn into_service(self) -> AppService {
        AppService::new(self)
    }
}
