pub mod access;

pub use access::{AUTH_TOKEN_HEADER, apply};
