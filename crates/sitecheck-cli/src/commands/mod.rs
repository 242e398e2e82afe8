pub mod check;
pub mod common;
pub mod completions;
pub mod key;
pub mod shell;
