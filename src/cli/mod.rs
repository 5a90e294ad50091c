pub mod commands;
pub mod handlers;
pub mod output;
pub mod parser;
