use crate::auth::{self, password};
use crate::database::models::{
    LoggedInUser, LoginInput, RegisterUserInput, RegisteredUser, UpdateUserInput, UpdatedUser,
};
use crate::database::repositories::{ConflictField, NewUser, RepositoryError, UserRepository};
use crate::error::ApiError;

pub struct UserService<R> {
    repository: R,
}

impl<R> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: UserRepository> UserService<R> {
    /// Validate, hash the password, then insert.
    pub async fn register(&self, input: RegisterUserInput) -> Result<RegisteredUser, ApiError> {
        input.validate().map_err(ApiError::Validation)?;
        let age = input
            .age
            .ok_or_else(|| ApiError::bad_request("age is required"))?;

        let password_hash = password::hash_password(&input.password)
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let new_user = NewUser {
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash,
            age,
        };

        let user = match self.repository.register(new_user).await {
            Ok(user) => user,
            Err(RepositoryError::Conflict(None)) => {
                return Err(self.disambiguate_conflict(&input.email, &input.username).await)
            }
            Err(err) => return Err(err.into()),
        };

        Ok(RegisteredUser::from(user))
    }

    /// Exchange credentials for a signed bearer token.
    pub async fn login(&self, input: LoginInput) -> Result<LoggedInUser, ApiError> {
        input.validate().map_err(ApiError::Validation)?;

        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| ApiError::unauthenticated("the email you entered are not registered"))?;

        if !password::verify_password(&input.password, &user.password_hash) {
            return Err(ApiError::unauthenticated("the password you entered are wrong"));
        }

        let token = auth::issue_token(&user.id, &user.email)?;
        Ok(LoggedInUser { token })
    }

    pub async fn update(&self, id: &str, input: UpdateUserInput) -> Result<UpdatedUser, ApiError> {
        let input = input.normalized();
        input.validate().map_err(ApiError::Validation)?;

        let user = match self.repository.update(id, input.clone()).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound) => return Err(ApiError::not_found("account not found")),
            Err(RepositoryError::Conflict(None)) => {
                let email = input.email.as_deref().unwrap_or_default();
                let username = input.username.as_deref().unwrap_or_default();
                return Err(self.disambiguate_conflict(email, username).await);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(UpdatedUser::from(user))
    }

    /// Removes the account and its social-media rows atomically.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.repository
            .delete_by_id(id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => ApiError::not_found("account not found"),
                other => other.into(),
            })
    }

    /// Fallback for conflicts whose constraint name was unavailable: probe
    /// the unique columns to decide which one collided.
    async fn disambiguate_conflict(&self, email: &str, username: &str) -> ApiError {
        match self.repository.find_by_email(email).await {
            Ok(Some(_)) => return ApiError::Conflict(Some(ConflictField::Email)),
            Ok(None) => {}
            Err(err) => return err.into(),
        }

        match self.repository.find_by_username(username).await {
            Ok(Some(_)) => ApiError::Conflict(Some(ConflictField::Username)),
            Ok(None) => ApiError::Conflict(None),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::database::models::User;

    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<Vec<User>>,
        register_error: Mutex<Option<RepositoryError>>,
    }

    impl MockUserRepository {
        fn seed(&self, username: &str, email: &str, password_hash: &str) {
            let now = Utc::now();
            self.users.lock().unwrap().push(User {
                id: format!("user-{:0>16}", username),
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                age: 30,
                created_at: now,
                updated_at: now,
            });
        }

        fn fail_next_register(&self, err: RepositoryError) {
            *self.register_error.lock().unwrap() = Some(err);
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn register(&self, user: NewUser) -> Result<User, RepositoryError> {
            if let Some(err) = self.register_error.lock().unwrap().take() {
                return Err(err);
            }

            let now = Utc::now();
            let stored = User {
                id: format!("user-{:0>16}", self.users.lock().unwrap().len()),
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
                age: user.age,
                created_at: now,
                updated_at: now,
            };
            self.users.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn find_by_id(&self, id: &str) -> Result<User, RepositoryError> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn update(
            &self,
            id: &str,
            changes: UpdateUserInput,
        ) -> Result<User, RepositoryError> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(RepositoryError::NotFound)?;

            if let Some(username) = changes.username {
                user.username = username;
            }
            if let Some(email) = changes.email {
                user.email = email;
            }
            if let Some(age) = changes.age {
                user.age = age;
            }
            user.updated_at = Utc::now();
            Ok(user.clone())
        }

        async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            if users.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    fn service() -> UserService<MockUserRepository> {
        UserService::new(MockUserRepository::default())
    }

    fn register_input() -> RegisterUserInput {
        RegisterUserInput {
            email: "a@x.com".to_string(),
            username: "a".to_string(),
            password: "secretpw".to_string(),
            age: Some(20),
        }
    }

    #[tokio::test]
    async fn test_register_returns_created_shape() {
        let service = service();

        let registered = service.register(register_input()).await.unwrap();

        assert!(registered.id.starts_with("user-"));
        assert_eq!(registered.email, "a@x.com");
        assert_eq!(registered.username, "a");
        assert_eq!(registered.age, 20);
    }

    #[tokio::test]
    async fn test_register_stores_a_hash_not_the_password() {
        let service = service();
        service.register(register_input()).await.unwrap();

        let stored = service
            .repository
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();

        assert_ne!(stored.password_hash, "secretpw");
        assert!(password::verify_password("secretpw", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let service = service();
        let mut input = register_input();
        input.password = "nope".to_string();

        let err = service.register(input).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.message(), "password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_register_passes_through_typed_conflict() {
        let service = service();
        service
            .repository
            .fail_next_register(RepositoryError::Conflict(Some(ConflictField::Email)));

        let err = service.register(register_input()).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(Some(ConflictField::Email))));
        assert_eq!(err.message(), "the email you entered has been used");
    }

    #[tokio::test]
    async fn test_register_probes_email_on_untyped_conflict() {
        let service = service();
        service.repository.seed("other", "a@x.com", "hash");
        service
            .repository
            .fail_next_register(RepositoryError::Conflict(None));

        let err = service.register(register_input()).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(Some(ConflictField::Email))));
    }

    #[tokio::test]
    async fn test_register_probes_username_on_untyped_conflict() {
        let service = service();
        service.repository.seed("a", "other@x.com", "hash");
        service
            .repository
            .fail_next_register(RepositoryError::Conflict(None));

        let err = service.register(register_input()).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Conflict(Some(ConflictField::Username))
        ));
        assert_eq!(err.message(), "the username you entered has been used");
    }

    #[tokio::test]
    async fn test_login_issues_a_verifiable_token() {
        let service = service();
        let hash = password::hash_password("secretpw").unwrap();
        service.repository.seed("a", "a@x.com", &hash);

        let logged_in = service
            .login(LoginInput {
                email: "a@x.com".to_string(),
                password: "secretpw".to_string(),
            })
            .await
            .unwrap();

        let identity = auth::verify_token(&logged_in.token).unwrap();
        assert_eq!(identity.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = service();

        let err = service
            .login(LoginInput {
                email: "ghost@x.com".to_string(),
                password: "secretpw".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthenticated(_)));
        assert_eq!(err.message(), "the email you entered are not registered");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = service();
        let hash = password::hash_password("secretpw").unwrap();
        service.repository.seed("a", "a@x.com", &hash);

        let err = service
            .login(LoginInput {
                email: "a@x.com".to_string(),
                password: "wrongpw".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthenticated(_)));
        assert_eq!(err.message(), "the password you entered are wrong");
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let service = service();

        let err = service
            .update("user-missing", UpdateUserInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.message(), "account not found");
    }

    #[tokio::test]
    async fn test_update_skips_empty_fields() {
        let service = service();
        service.repository.seed("a", "a@x.com", "hash");
        let id = format!("user-{:0>16}", "a");

        let updated = service
            .update(
                &id,
                UpdateUserInput {
                    email: Some(String::new()),
                    username: Some("fresh".to_string()),
                    age: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.username, "fresh");
    }

    #[tokio::test]
    async fn test_delete_missing_account() {
        let service = service();

        let err = service.delete("user-missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.message(), "account not found");
    }
}
