pub mod app;
pub mod cli;
pub mod config;
pub mod gallery;
pub mod model;
pub mod navigation;
pub mod output;
pub mod provider;
pub mod render;
pub mod router;
pub mod runner;
pub mod state;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests;
