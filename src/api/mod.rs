//! API Module
//!
//! HTTP handlers and routing for the verification server REST API.
//!
//! # Endpoints
//! - `POST /users` - Register a user
//! - `GET|POST /caches` - List or create caches
//! - `GET /caches/:id` - Cache detail
//! - `GET /caches/:id/quiz` - Random quiz question
//! - `POST /caches/:id/answers` - Submit an answer
//! - `GET /caches/:id/accumulator` - Current accumulator
//! - `GET /caches/:id/audit` - History replay check
//! - `GET /stats` - Verification statistics
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{Principal, USER_ID_HEADER};
pub use handlers::*;
pub use routes::create_router;
