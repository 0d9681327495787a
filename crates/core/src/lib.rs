//! Core library: record codec, labeling session, key map, settings and image lookup.

pub mod config;
pub mod images;
pub mod keymap;
pub mod models;
pub mod records;
pub mod session;
pub mod settings;
