pub mod app;
pub mod cli;
pub mod config;
pub mod form;
pub mod grid;
pub mod output;
pub mod resolver;
pub mod session;
pub mod tabs;
pub mod utils;

#[cfg(test)]
mod tests;
