pub mod dates;
pub mod email;
pub mod object_key;
