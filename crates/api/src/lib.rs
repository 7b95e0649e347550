//! HTTP front end: server-rendered supplier pages, routing, and configuration.

pub mod app;
pub mod config;
