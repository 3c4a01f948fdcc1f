// Resume layout: markdown dialect → positioned text runs on fixed-size pages.
// Pure and synchronous. Callers on the async runtime go through tokio::task::spawn_blocking.

pub mod document;
pub mod flow;
pub mod font_metrics;
pub mod markdown;
pub mod renderer;

// Re-export the public API consumed by the PDF writer and handlers.
pub use document::{default_layout_config, Document, PageSize, TextRun};
pub use font_metrics::{FontFamily, FontWeight};
pub use renderer::layout_markdown;
