//! Credentials and tokens: [`password`] hashing and policy, [`jwt`] access
//! and refresh tokens.

pub mod jwt;
pub mod password;
