//! Admin account creation.
//!
//! Self-registration only ever produces guests, so this is the way the first
//! admin gets into the user store.

use coursekeep_core::{AuthError, UserRole, hash_password};
use coursekeep_db::UserRepository;
use coursekeep_models::{NewUser, RegisterRequest};
use validator::{Validate, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The input breaks the same rules self-registration enforces.
    #[error("invalid input: {0}")]
    Invalid(String),

    #[error(transparent)]
    Store(#[from] AuthError),
}

#[derive(Debug, Clone)]
pub struct AdminInput {
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Checks the input against the registration rules.
fn validate(input: &AdminInput) -> Result<(), AdminError> {
    RegisterRequest {
        first_name: input.first_name.clone(),
        middle_name: input.middle_name.clone(),
        surname: input.surname.clone(),
        email: input.email.clone(),
        password: input.password.clone(),
        phone: input.phone.clone(),
        role: None,
    }
    .validate()
    .map_err(|errors| AdminError::Invalid(describe(&errors)))
}

/// Validates the input, hashes the password and stores the user with the
/// `admin` role.
pub async fn create_admin(
    users: &dyn UserRepository,
    input: AdminInput,
) -> Result<i64, AdminError> {
    validate(&input)?;

    let password_hash = hash_password(&input.password)?;

    let id = users
        .save(&NewUser {
            first_name: input.first_name,
            middle_name: input.middle_name,
            surname: input.surname,
            email: input.email,
            password_hash,
            phone: input.phone,
            role: UserRole::Admin,
        })
        .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursekeep_core::verify_password;
    use coursekeep_db::MemoryUserRepository;

    fn input(email: &str) -> AdminInput {
        AdminInput {
            first_name: "Root".into(),
            middle_name: "R".into(),
            surname: "Admin".into(),
            email: email.into(),
            phone: "+15550100123".into(),
            password: "longenough1".into(),
        }
    }

    #[tokio::test]
    async fn test_create_admin_stores_admin_role() {
        let repo = MemoryUserRepository::new();
        let id = create_admin(&repo, input("root@x.com")).await.unwrap();

        let user = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert!(verify_password("longenough1", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_admin_duplicate_email() {
        let repo = MemoryUserRepository::new();
        create_admin(&repo, input("root@x.com")).await.unwrap();
        assert!(matches!(
            create_admin(&repo, input("root@x.com")).await,
            Err(AdminError::Store(AuthError::AlreadyExists))
        ));
    }

    #[tokio::test]
    async fn test_create_admin_short_password() {
        let repo = MemoryUserRepository::new();
        let mut short = input("root@x.com");
        short.password = "short".into();

        match create_admin(&repo, short).await {
            Err(AdminError::Invalid(message)) => {
                assert_eq!(message, "password must be at least 8 characters")
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
        assert!(!repo.exists_by_email("root@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_admin_uses_registration_rules() {
        let repo = MemoryUserRepository::new();
        let mut bad = input("not-an-email");
        bad.phone = "12345".into();

        match create_admin(&repo, bad).await {
            Err(AdminError::Invalid(message)) => {
                assert!(message.contains("email must be a valid email address"));
                assert!(message.contains("phone"));
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }
}
