use super::Renderer;

/// Bare text with bracketed priority tags. Safe for logs and pipes.
pub struct PlainRenderer;

impl Renderer for PlainRenderer {}
