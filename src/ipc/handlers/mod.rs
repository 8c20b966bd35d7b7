pub mod core;
pub mod courses;
pub mod imports;
