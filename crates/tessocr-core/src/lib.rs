//! Thin wrapper around the `tesseract` command-line OCR engine.
//!
//! ```no_run
//! use tessocr_core::Recognizer;
//!
//! let text = Recognizer::new("scans/invoice.png")
//!     .language("eng")
//!     .whitelist(["0123456789", "."])
//!     .recognize()?;
//! # Ok::<(), tessocr_core::OcrError>(())
//! ```

pub mod command;
pub mod engine;
pub mod error;
pub mod recognizer;
pub mod temp_dir;
pub mod whitelist;

pub use command::TesseractCommand;
pub use engine::{OcrEngine, TesseractEngine};
pub use error::{OcrError, Result};
pub use recognizer::{Recognizer, RecognizerSettings, DEFAULT_BINARY};
pub use whitelist::{build_whitelist, CharList};
