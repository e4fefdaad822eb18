pub mod auth;
pub mod club;
pub mod export;

pub use club::Club;
