pub mod auth;
pub mod id;
pub mod kudo;
pub mod profile;
pub mod session;
pub mod user;
