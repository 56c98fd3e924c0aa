//! DTOs for users_sea adapter.

use time::Date;
use uuid::Uuid;

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: Option<String>,
}

/// DTO for a partial profile update. `None` leaves the column untouched;
/// `gender: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<Option<String>>,
}

impl UserProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
    }
}

/// DTO for replacing a user's password hash.
#[derive(Debug, Clone)]
pub struct PasswordUpdate {
    pub id: Uuid,
    pub password_hash: String,
}
