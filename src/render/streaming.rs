//! Streaming renderer for progressive reveal of an answer.
//!
//! The host UI reveals an answer a piece at a time. The streaming renderer
//! yields one event per block from an already processed answer, so the
//! pipeline never has to run again while the answer is being shown.
//!
//! # Example
//!
//! ```
//! use chatfmt::render::{RenderEvent, StreamingRenderer};
//!
//! fn main() -> chatfmt::Result<()> {
//!     let content = chatfmt::process("**Hi** there\n\n---\n\nBye", false, &[])?;
//!     let renderer = StreamingRenderer::new(&content, Default::default());
//!
//!     for event in renderer {
//!         match event {
//!             RenderEvent::Block { index, html } => println!("{}: {}", index, html),
//!             RenderEvent::Start { block_count, .. } => println!("{} blocks", block_count),
//!             _ => {}
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use crate::model::ProcessedContent;

use super::{HtmlRenderer, RenderOptions};

/// Events emitted during streaming rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// Rendering has started.
    Start {
        /// Number of blocks that will follow
        block_count: usize,
        /// Number of extracted images
        image_count: usize,
    },

    /// One rendered block.
    Block {
        /// Position of the block in reading order
        index: usize,
        /// Rendered HTML
        html: String,
    },

    /// The image gallery (only when images are enabled and present).
    Images(String),

    /// Rendering has completed.
    End,
}

impl RenderEvent {
    /// Check if this is a content-bearing event.
    pub fn has_content(&self) -> bool {
        matches!(self, RenderEvent::Block { .. } | RenderEvent::Images(_))
    }

    /// Get the content if this is a content event.
    pub fn content(&self) -> Option<&str> {
        match self {
            RenderEvent::Block { html, .. } | RenderEvent::Images(html) => Some(html),
            _ => None,
        }
    }

    /// Check if this is a start or end event.
    pub fn is_boundary(&self) -> bool {
        matches!(self, RenderEvent::Start { .. } | RenderEvent::End)
    }
}

/// Internal state for the streaming renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// Before any output
    Initial,
    /// Emitting blocks
    InBlocks { next: usize },
    /// All blocks emitted, gallery next
    BlocksComplete,
    /// Waiting to emit the end event
    Finishing,
    /// Rendering complete
    Done,
}

/// Streaming renderer that yields rendering events as an iterator.
pub struct StreamingRenderer<'a> {
    content: &'a ProcessedContent,
    renderer: HtmlRenderer,
    state: StreamState,
}

impl<'a> StreamingRenderer<'a> {
    /// Create a new streaming renderer.
    pub fn new(content: &'a ProcessedContent, options: RenderOptions) -> Self {
        Self {
            content,
            renderer: HtmlRenderer::new(options),
            state: StreamState::Initial,
        }
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.content.blocks.len()
    }

    /// Check if rendering is complete.
    pub fn is_done(&self) -> bool {
        self.state == StreamState::Done
    }
}

impl<'a> Iterator for StreamingRenderer<'a> {
    type Item = RenderEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            StreamState::Initial => {
                self.state = StreamState::InBlocks { next: 0 };
                Some(RenderEvent::Start {
                    block_count: self.content.blocks.len(),
                    image_count: self.content.extracted_images.len(),
                })
            }

            StreamState::InBlocks { next } => match self.content.blocks.get(next) {
                Some(block) => {
                    self.state = StreamState::InBlocks { next: next + 1 };
                    Some(RenderEvent::Block {
                        index: next,
                        html: self.renderer.render_block(block),
                    })
                }
                None => {
                    self.state = StreamState::BlocksComplete;
                    self.next()
                }
            },

            StreamState::BlocksComplete => {
                self.state = StreamState::Finishing;
                let images = &self.content.extracted_images;
                if self.renderer.options().include_images && !images.is_empty() {
                    Some(RenderEvent::Images(self.renderer.render_images(images)))
                } else {
                    self.next()
                }
            }

            StreamState::Finishing => {
                self.state = StreamState::Done;
                Some(RenderEvent::End)
            }

            StreamState::Done => None,
        }
    }
}

/// Collect all content from a streaming renderer into a single string.
pub fn collect_content(renderer: StreamingRenderer<'_>) -> String {
    let parts: Vec<String> = renderer
        .filter_map(|event| event.content().map(str::to_string))
        .collect();
    parts.join("\n")
}
