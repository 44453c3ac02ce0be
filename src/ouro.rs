//! Main module for ouro library functionality

pub mod engine;
pub mod render;
pub mod rules;
pub mod scanner;
pub mod token;
