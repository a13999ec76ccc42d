//! Domain layer - Core business entities.

mod user;

pub use user::{User, UserInput};
