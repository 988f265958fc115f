use std::ops::Deref;

use crate::repository::{self, User};

mod login;
mod register;

pub use login::LoginInput;
pub use register::{EMAIL_TAKEN, RegisterInput, USERNAME_TAKEN};

/// Registration and login transitions over the credential store.
#[derive(Clone)]
pub struct Command {
    state: cookshare_shared::State,
}

impl Deref for Command {
    type Target = cookshare_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: cookshare_shared::State) -> Self {
        Self { state }
    }

    pub async fn find_by_username(
        &self,
        username: impl AsRef<str>,
    ) -> cookshare_shared::Result<Option<User>> {
        Ok(repository::find_user_by_username(&self.read_db, username.as_ref().to_lowercase()).await?)
    }
}
