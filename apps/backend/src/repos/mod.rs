pub mod recordings;
pub mod users;
