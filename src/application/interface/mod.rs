pub mod crypto;
pub mod db;
pub mod gateway;
pub mod s3;
