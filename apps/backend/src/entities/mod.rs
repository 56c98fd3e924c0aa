pub mod recordings;
pub mod users;

pub use recordings::Entity as Recordings;
pub use users::Entity as Users;
