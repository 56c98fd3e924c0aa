mod recordings;
mod users;
