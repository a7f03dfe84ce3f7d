//! # Folio HTML Compiler
//!
//! Static rendering of a page snapshot: a complete document for previews and
//! publishing, or a fragment for embedding.
//!
//! Text block content is markdown and goes through a [`MarkdownTransform`];
//! every other value is HTML-escaped.

mod compiler;

pub use compiler::{
    compile_blocks, compile_page, CommonMark, CompileError, CompileOptions, MarkdownTransform,
};

#[cfg(test)]
mod tests;
