//! MacroTrack: terminal client for a personal weight and nutrition tracker.
//!
//! All persistence, aggregation and label OCR live in the tracker backend;
//! this crate holds the REST client, the entry forms and the controller that
//! decides which screen to show.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod platform;
pub mod terminal;

#[cfg(test)]
mod test_support;
