// Credentials and tokens used by the users and orders modules

pub mod jwt;
pub mod password;
