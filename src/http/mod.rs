//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the page and static-asset handlers,
//! decoupled from rendering and dispatch.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_asset_response,
    build_empty_response, build_error_page_response, build_page_response,
};
