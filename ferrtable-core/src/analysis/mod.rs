pub mod bbox;
pub mod draw;
pub mod quad;
pub mod sort;
