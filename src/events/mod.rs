pub mod page;
pub mod pointer;

pub use page::{active_filter, wire_page_handlers};
pub use pointer::{wire_input_handlers, InputWiring};
