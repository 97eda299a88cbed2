//! Histogram-based tone filters.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W) | u8 | Single intensity channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! ## Filter Categories
//!
//! - **Equalization**: global contrast stretch through the image's own CDF
//!   (luma only for color images)
//! - **Specification**: remap a channel onto a reference distribution,
//!   one independent run per reference channel
//!
//! All filters are pure: inputs are borrowed views, outputs are new arrays.

pub mod histogram;
pub mod color_space;
pub mod equalize;
pub mod specify;
