//! Context-aware escaping of untrusted text.
//!
//! Book titles, chapter contents and user options end up in several output
//! contexts. Each context has its own escaper:
//!
//! | Context                         | Function                        |
//! |---------------------------------|---------------------------------|
//! | HTML element text / attribute   | [`escape_html`]                 |
//! | HTML comment                    | [`sanitize_for_html_comment`]   |
//! | JavaScript string literal       | [`escape_js_string`]            |
//! | `<script>` data block           | [`escape_for_script_tag`]       |
//! | CSS length value                | [`validate_css_size`]           |
//! | Output filename                 | [`sanitize_filename`]           |
//!
//! All functions are pure and total: they never fail and never panic.

mod css;
mod filename;
mod html;
mod js;
mod script;

pub use css::{CssSize, sanitize_css_size, validate_css_size};
pub use filename::{MAX_FILENAME_BYTES, sanitize_filename, sanitize_filename_for_format};
pub use html::{escape_html, sanitize_for_html_comment};
pub use js::escape_js_string;
pub use script::escape_for_script_tag;
