mod console;
mod outputformatter;

pub use console::Console;
pub use outputformatter::{print_page_info, print_table};
