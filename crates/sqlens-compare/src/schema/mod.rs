//! Name-based diffing of schema descriptors.

mod diff;

#[cfg(test)]
mod tests;

pub use diff::*;
