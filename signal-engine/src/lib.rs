pub mod config;
pub mod engine;
pub mod indicators;
pub mod models;
pub mod sentiment;
pub mod signal;
pub mod trending;

#[cfg(test)]
mod tests;
