// src/lib.rs

//! toonbell: new chapter announcements for a manga reader site

pub mod config;
#[cfg(feature = "discord")]
pub mod discord;
pub mod error;
pub mod herald;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
