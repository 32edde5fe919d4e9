//! Sorties de glyphtile : console et HTML.

pub mod console;
pub mod html;

pub use console::ConsoleOutput;
pub use html::HtmlOutput;
