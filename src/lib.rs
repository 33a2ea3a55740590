pub mod app;
pub mod carousel;
pub mod config;
pub mod debounce;
pub mod error;
pub mod events;
pub mod frontend;
pub mod modal;
pub mod models;
pub mod render;
pub mod search;
pub mod state;
pub mod surface;
pub mod tmdb;
pub mod utils;
