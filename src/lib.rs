//! Interactive builder for time-series query URLs.
//!
//! [`query::build_query_url`] turns a [`query::QueryFormState`] into the
//! canonical query string; [`timefmt`] produces the `YY.DOY.HH.MM.SS.mmm`
//! timestamps it carries. The [`app`] module is the egui screen on top.

pub mod app;
pub mod config;
pub mod query;
pub mod timefmt;

pub use app::App;
pub use config::BuilderConfig;
pub use query::{QueryFormState, build_query_url};
