#![forbid(unsafe_code)]

pub mod classify;
pub mod cli;
pub mod logging;
pub mod mcp;
pub mod reader;
pub mod render;
pub mod source;
pub mod sync;
