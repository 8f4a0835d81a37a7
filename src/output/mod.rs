//! Result rendering: text graphs, DOT files, debug traces, the verdict
//! table, and JSON records. Rendering failures are local — they are
//! logged and never affect a verdict.

pub mod debug_html;
pub mod dot;
pub mod json;
pub mod results;
pub mod text;

pub use debug_html::DebugTrace;
pub use json::JsonWriter;
