//! Platform - Cross-cutting technical services
//!
//! Security plumbing shared by the domain crates:
//! - `password` - Argon2id password hashing and policy checks
//! - `token` - HMAC-SHA256 signed bearer tokens for stateless auth

pub mod password;
pub mod token;
