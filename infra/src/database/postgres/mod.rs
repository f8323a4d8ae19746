//! PostgreSQL repository implementations

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::PgTokenRepository;
pub use user_repository_impl::PgUserRepository;
