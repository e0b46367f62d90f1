mod entry;
pub mod public;
pub mod todo;

pub use entry::{API_PREFIX, app, router};
