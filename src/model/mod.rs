pub mod book;
pub mod config;
pub mod filter;
pub mod store;
pub mod task;

pub use book::*;
pub use config::*;
pub use filter::*;
pub use store::*;
pub use task::*;
