// src/services/auth.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::Storage,
    models::users::{NewUser, User},
};

// Senha é um texto opaco: sem hash, comparação direta.
#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn register_user(&self, new: NewUser) -> Result<User, AppError> {
        let user = self.storage.create_user(new).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .storage
            .get_user_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.password != password {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemStorage, models::status::UserRole};

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemStorage::new()))
    }

    fn parent() -> NewUser {
        NewUser {
            username: "parent1".into(),
            email: "parent1@example.com".into(),
            password: "hunter2".into(),
            first_name: "Pat".into(),
            last_name: "Parent".into(),
            role: UserRole::Parent,
            phone: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn login_accepts_matching_password() {
        let auth = service();
        let registered = auth.register_user(parent()).await.unwrap();
        let logged_in = auth.login_user("parent1", "hunter2").await.unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_user() {
        let auth = service();
        auth.register_user(parent()).await.unwrap();

        assert!(matches!(
            auth.login_user("parent1", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login_user("nobody", "hunter2").await,
            Err(AppError::InvalidCredentials)
        ));
    }
}
