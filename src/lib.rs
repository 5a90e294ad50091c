pub mod cli;
pub mod commands;
pub mod io;
pub mod model;
