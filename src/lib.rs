// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;

pub mod batch;
pub mod fetch;
pub mod file;
pub mod html;
pub mod ids;
pub mod progress;
pub mod runner;

pub use error::{ Error, Result };
