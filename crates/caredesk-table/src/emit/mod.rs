//! Output formats for a [`RenderedTable`](crate::table::RenderedTable).

mod html;
mod json;
mod text;

pub use html::{to_html, to_html_with_pagination};
pub use json::{to_json, to_json_value};
pub use text::{DEFAULT_TEXT_WIDTH, TextOptions, to_text, to_text_with_pagination};
