mod page;
pub mod public;
mod router;
pub use page::{INDEX_TEMPLATE, templates};
pub use router::index;
