//! Headless client for the bookmark service: the HTTP binding plus the
//! application-state containers a UI layer renders from.

pub mod dashboard;
pub mod form;
pub mod http;

pub use dashboard::Dashboard;
pub use form::{BookmarkForm, FormError, COMMON_TAGS};
pub use http::{BookmarkClient, ClientError, ClientResult};
