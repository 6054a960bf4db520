//! Version specification parsing for npm-style constraints
//!
//! Recognises the constraint forms npm, yarn and pnpm accept in
//! package.json and reduces each one to a kind plus a base version.

mod node;

pub use node::NodeVersionParser;
