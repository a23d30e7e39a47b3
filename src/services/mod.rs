// Services
// Pure transforms and matchers, configuration, and the native host protocol.

pub mod bookmark_filter;
pub mod config_engine;
pub mod native_client;
pub mod native_transport;
pub mod schema_transform;
pub mod url_matcher;
pub mod version_gate;
