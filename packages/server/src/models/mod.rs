pub mod auth;
pub mod food;
pub mod shared;
pub mod stats;
