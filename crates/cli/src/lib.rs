pub mod cli;
pub mod error;
pub mod proxy;
pub mod render;
pub mod signals;
