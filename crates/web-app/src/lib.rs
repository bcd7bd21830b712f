#![warn(clippy::pedantic)]

pub mod log;
pub mod transfer;
