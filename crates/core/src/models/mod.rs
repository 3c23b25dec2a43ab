pub mod administrator;
pub mod course;
pub mod school;
pub mod stats;
pub mod student;
pub mod teacher;
pub mod transfer;
