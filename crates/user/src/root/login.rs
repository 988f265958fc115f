use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::repository;

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl super::Command {
    /// Verifies the credentials and returns the lowercased username.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// [`cookshare_shared::Error::Credentials`].
    pub async fn login(&self, input: LoginInput) -> cookshare_shared::Result<String> {
        let username = input.username.to_lowercase();

        let Some(user) = repository::find_user_by_username(&self.read_db, username).await? else {
            return Err(cookshare_shared::Error::Credentials);
        };

        let parsed_hash = PasswordHash::new(&user.password_hash)?;
        let argon2 = Argon2::default();

        if argon2
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            return Err(cookshare_shared::Error::Credentials);
        }

        Ok(user.username)
    }
}
