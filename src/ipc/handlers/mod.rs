pub mod cgpa;
pub mod core;
pub mod exports;
pub mod records;
pub mod subjects;
pub mod upload;
