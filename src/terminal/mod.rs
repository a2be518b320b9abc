//! Terminal output plumbing.

mod output;

pub use output::OutputBuffer;
