pub mod digitize;
pub mod profile;
