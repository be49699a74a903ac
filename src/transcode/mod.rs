//! On-demand image transcoding.
//!
//! Gallery previews are produced by decoding the original, shrinking it to fit
//! a bounding box and re-encoding it as PNG:
//!
//! ```text
//! original bytes ──► decode ──► fit_within(bounds) ──► resize ──► PNG
//! ```
//!
//! - [`ImageTranscoder`]: decode / resize / encode pipeline
//! - [`TranscodeBounds`]: optional max width and height
//! - [`fit_within`]: aspect-preserving, shrink-only size computation
//!
//! Nothing is cached; every call does the full pipeline.

mod dimensions;
mod encoder;

pub use dimensions::{fit_within, TranscodeBounds};
pub use encoder::{ImageTranscoder, TranscodedImage, OUTPUT_CONTENT_TYPE};

/// Default maximum preview width.
pub const DEFAULT_MAX_WIDTH: u32 = 800;

/// Default maximum preview height.
pub const DEFAULT_MAX_HEIGHT: u32 = 600;
