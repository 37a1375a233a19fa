//! 平台相关输出

pub mod cli;

pub use cli::print_error_with_source;
