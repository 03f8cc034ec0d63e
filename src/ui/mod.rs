pub mod console;
pub mod terminal;
pub mod theme;
pub mod views;
