pub mod grading;
pub mod hinting;
