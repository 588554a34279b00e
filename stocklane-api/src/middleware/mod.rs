/// Middleware modules for the API server
///
/// Authentication middleware lives in `stocklane_shared::auth`; this
/// module holds the response-level middleware:
/// - Security headers

pub mod security;
