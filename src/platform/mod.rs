pub mod console;
pub mod picker;
