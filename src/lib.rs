#[macro_use]
extern crate tracing;

pub mod cli;
pub mod discography;
pub mod fetch;
pub mod slug;
