pub mod materials;
pub mod content;
