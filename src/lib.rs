pub mod cli;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod history;
pub mod planner;
pub mod recipe;
