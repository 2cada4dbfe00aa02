//! Front-end for the Bloom filter engine: argument handling, the interactive
//! prompt and evaluation report rendering.

pub mod args;
pub mod repl;
pub mod report;

pub use args::Args;
pub use repl::{parse_line, Command, Flow, Line, Mode, Repl, MAX_RENDERED_BITS};
pub use report::{write_adjustments, write_report, write_sweep};
