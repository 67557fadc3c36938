//! Library exports for the inventory service
//!
//! This module exposes internal components for testing and potential library usage.

pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod model;
pub mod repository;
pub mod route;
