//! Request/response plumbing shared by every endpoint.

pub mod query;
pub mod request;
pub mod response;
pub mod transport;

pub use query::{build_query_string, QueryParams};
pub use request::{Body, Method, Request, RequestOptions};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};
