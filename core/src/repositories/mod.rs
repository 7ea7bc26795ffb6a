//! Repository interfaces for the persistence boundaries.

pub mod token_repository;
pub mod user_repository;

pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;
