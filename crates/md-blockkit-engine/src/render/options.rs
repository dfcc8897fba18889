/// The unordered-list prefix used by default.
pub const DEFAULT_BULLET: &str = "• ";

/// Knobs read by the renderers and the block assembler.
///
/// `Default` reproduces the stock output format exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for unordered list items, independent of nesting depth.
    pub bullet: String,
    /// Value of the `emoji` flag on plain-text headers and image titles.
    pub header_emoji: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bullet: DEFAULT_BULLET.to_string(),
            header_emoji: true,
        }
    }
}
