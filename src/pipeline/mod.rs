pub mod assign;
pub mod container;
pub mod contrast;
pub mod hue;
