//! dexview core library exports

pub mod catalog;
pub mod config;
pub mod view;
