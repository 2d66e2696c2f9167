//! Decision Desk - Local-first Decision Support Application
//!
//! This crate implements the application shell for a decision support tool:
//! a view router over a closed set of screens, session state with named
//! transitions, persisted preferences, and an error boundary that contains
//! rendering failures.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
