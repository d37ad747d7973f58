pub mod garage;
pub mod profile;
pub mod records;
