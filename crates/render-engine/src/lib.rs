//! Photostamp Render Engine
//!
//! Draws a timestamp onto a copy of one photo and exports it as JPEG.
//!
//! # Pipeline Architecture
//!
//! ```text
//! source/a.png ──┐
//!                ├── Decode (format sniffed from bytes)
//!                │         │
//! assignment ────┘         ├── Copy onto RGB canvas
//!                          │         │
//! font asset ──────────────┘         ├── Draw "YYYY/MM/DD HH:MM:SS"
//!                                    │         │
//!                                    ▼         ▼
//!                              Encode (JPEG, quality 100)
//!                                    │
//!                                    ▼
//!                              target/a.jpg
//! ```

pub mod compositor;
pub mod font;
pub mod stamper;

pub use font::FontAsset;
pub use stamper::*;
