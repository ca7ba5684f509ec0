/// Result formatting: printf-style templates and the plain-text page renderer.
pub mod render;
pub mod template;

pub use render::{Rendered, render_text};
pub use template::FormatError;
