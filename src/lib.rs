//! Seven-day city forecast
//!
//! Loads city coordinates from CSV, looks up the 7Timer! civillight forecast
//! for the chosen city and renders it in the terminal. The library exposes
//! the store, the I/O layer and the components for testing.

pub mod action;
pub mod api;
pub mod cities;
pub mod components;
pub mod effect;
pub mod forecast;
pub mod location;
pub mod reducer;
pub mod state;
pub mod tasks;
