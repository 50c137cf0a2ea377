use serde::Serialize;

use crate::model::{Note, User};

/// User as shown to the outside: the password hash stays in the store.
#[derive(Serialize, Debug)]
pub struct FilteredUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for FilteredUser {
    fn from(user: &User) -> Self {
        FilteredUser {
            username: user.username.to_owned(),
            email: user.email.to_owned(),
            first_name: user.first_name.to_owned(),
            last_name: user.last_name.to_owned(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UserPage {
    pub user: FilteredUser,
    pub notes: Vec<Note>,
}
