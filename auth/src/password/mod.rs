pub mod argon2;
pub mod errors;

pub use argon2::PasswordCost;
pub use argon2::PasswordHasher;
pub use errors::PasswordError;
