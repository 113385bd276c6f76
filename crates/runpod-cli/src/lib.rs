pub mod cli;

mod app_config;
mod commands;
mod context;
mod logging;
