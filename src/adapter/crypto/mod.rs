pub mod argon2;
