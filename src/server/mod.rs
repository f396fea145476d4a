//! HTTP server layer for EXIF Probe.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                       POST /api/exif                            │
//! │                                                                 │
//! │  ┌──────────────────────┐        ┌───────────────────────────┐  │
//! │  │       handlers       │        │          routes           │  │
//! │  │ (multipart, errors)  │        │ (body limit, CORS, trace) │  │
//! │  └──────────────────────┘        └───────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    exif_handler, health_handler, ErrorResponse, ExifResponse, HealthResponse, IMAGE_FIELD,
};
pub use routes::{create_router, RouterConfig};
