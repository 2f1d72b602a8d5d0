#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod callout;
pub mod config;
pub mod dashboard;
pub mod frontmatter;
pub mod template;
pub mod toc;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
