pub mod auth;
pub mod kudo;
pub mod profile;
pub mod session;
pub mod users;
