//! Shared types reused across endpoints.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedUsers, PaginationMeta, PaginationParams};
pub use response::{Created, NoContent};
