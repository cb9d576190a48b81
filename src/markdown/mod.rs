//! Markdown text utilities.
//!
//! The assembler never converts Markdown to HTML. It only needs a few
//! line-level operations on chapter sources:
//!
//! - [`tighten_lists`] - make `-` bullet lists survive strict converters
//! - [`slugify`] / [`Slugger`] - GitHub-style anchors for navigation entries
//! - [`h1_text`] / [`detect_title`] - recognise top-level headings

mod lists;
mod slugify;
mod title;

pub use lists::{is_bullet_line, tighten_lists};
pub use slugify::{Slugger, slugify};
pub use title::{detect_title, h1_text, is_h1};
