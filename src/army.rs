//! Main module for armylist library functionality

pub mod bank;
pub mod classifier;
pub mod config;
pub mod distance;
pub mod error;
pub mod flattening;
pub mod items;
pub mod lexing;
pub mod parsing;
pub mod testing;
