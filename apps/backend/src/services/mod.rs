pub mod mail;
pub mod recordings;
pub mod users;
pub mod validation;
