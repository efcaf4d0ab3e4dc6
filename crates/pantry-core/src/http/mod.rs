//! HTTP routing core: path shapes, dispatch and status mapping.
//!
//! Kept free of any web framework; the server binary adapts its requests to
//! [`Router::handle`].

pub mod response;
pub mod route;
pub mod router;

pub use self::response::{ApiResponse, ContentType};
pub use self::route::{API_VERSION, Method, Route};
pub use self::router::Router;
