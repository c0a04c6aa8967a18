//! Request-level middleware and extractors.
//!
//! - `auth`: bearer token extraction and the role based `AuthGuard`
//! - `cache`: in-process LRU cache for successful `GET` responses
//! - `rate_limit`: per-IP token bucket limits with JSON rejections

pub mod auth;
pub mod cache;
pub mod rate_limit;

#[cfg(test)]
mod test;
