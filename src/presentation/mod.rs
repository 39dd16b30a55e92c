pub mod output;
pub mod spinner;
pub mod theme;
