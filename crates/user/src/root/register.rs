use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use validator::Validate;

use crate::repository::{self, NewUser, UniqueField};

pub const USERNAME_TAKEN: &str = "Username already exists, please choose another";
pub const EMAIL_TAKEN: &str = "Email already registered";

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 50, message = "Username must be 1 to 50 characters"))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl super::Command {
    /// Creates the user and returns its lowercased username.
    pub async fn register(&self, input: RegisterInput) -> cookshare_shared::Result<String> {
        input.validate()?;

        let username = input.username.to_lowercase();

        if repository::find_user_by_username(&self.read_db, username.to_owned())
            .await?
            .is_some()
        {
            cookshare_shared::conflict!("{USERNAME_TAKEN}");
        }

        if repository::find_user_by_email(&self.read_db, input.email.to_owned())
            .await?
            .is_some()
        {
            cookshare_shared::conflict!("{EMAIL_TAKEN}");
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        let user = NewUser::new(&username, input.email, password_hash);

        match repository::insert_user(&self.write_db, user).await {
            Ok(id) => {
                tracing::info!(user = id, username, "user registered");
            }
            // Lost a race with a concurrent registration.
            Err(err) => match repository::unique_violation(&err) {
                Some(UniqueField::Username) => cookshare_shared::conflict!("{USERNAME_TAKEN}"),
                Some(UniqueField::Email) => cookshare_shared::conflict!("{EMAIL_TAKEN}"),
                None => return Err(err.into()),
            },
        }

        Ok(username)
    }
}
