pub mod home;
pub mod scan;
