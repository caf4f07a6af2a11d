pub mod extract;
pub mod list;
pub mod query;
pub mod reset;
pub mod save;
