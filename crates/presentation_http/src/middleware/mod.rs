//! HTTP middleware

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id};
