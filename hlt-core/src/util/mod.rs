pub mod date;
pub mod sort;
