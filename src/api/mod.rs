pub mod extract;
pub mod pagination;

pub use extract::{optional_number, required_number, ApiJson};
pub use pagination::{Page, PageQuery, PageRequest, Pagination};
