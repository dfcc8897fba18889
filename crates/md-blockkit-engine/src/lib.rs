//! Converts Markdown into chat-platform message blocks.
//!
//! The pipeline is [`lexer`] (Markdown to token tree), the pure renderers in
//! [`render`], and [`assemble`], which maps each top-level token to zero or
//! one [`Block`](blocks::Block). [`Converter`] bundles the whole thing.

pub mod assemble;
pub mod blocks;
pub mod convert;
pub mod io;
pub mod lexer;
pub mod render;

// Re-export key types for easier usage
pub use assemble::{BlockAssembler, assemble};
pub use blocks::{Block, Cell, Message, TextObject, TextStyle};
pub use convert::{Converter, markdown_to_blocks};
pub use io::IoError;
pub use lexer::{LexOptions, Token, lex};
pub use render::RenderOptions;
