pub mod entities;
pub mod feed;
