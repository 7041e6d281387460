pub mod constants;
pub mod coordinates;
pub mod records;
pub mod time;
