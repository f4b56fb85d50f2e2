//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, with memory zeroization)
//! - Cookie management
//! - Random code/byte generation

pub mod cookie;
pub mod crypto;
pub mod password;
