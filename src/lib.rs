pub mod charset;
pub mod dom;
pub mod error;
pub mod generator;
pub mod random;
#[cfg(feature = "web")]
pub mod web;

pub use charset::{CharClass, Policy, Violation};
pub use dom::{Document, MemoryDocument, attach, fill_target, install_defaults};
pub use error::{Error, Result};
pub use generator::{Password, generate, generate_with};
pub use random::{FallbackSource, RandomSource, SecureSource, Strength, select_source};
