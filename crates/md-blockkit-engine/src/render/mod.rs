//! # Renderers
//!
//! Pure structural recursions over the immutable [`Token`](crate::lexer::Token)
//! tree. Nothing here allocates state outside the call, so every function is
//! safe to run concurrently on independent inputs.
//!
//! - **`inline`**: inline tokens to the destination markup dialect
//! - **`plain`**: inline or block tokens to literal text with all markup stripped
//! - **`list`**: (nested) lists to indented, numbered markup lines
//! - **`table`**: table cell tokens to structured cells
//! - **`options`**: `RenderOptions`, the knobs the renderers read

pub mod inline;
pub mod list;
pub mod options;
pub mod plain;
pub mod table;

pub use inline::{Markup, render_inline};
pub use list::render_list;
pub use options::RenderOptions;
pub use plain::plain_text;
pub use table::build_cell;
