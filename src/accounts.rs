//! Reviewer account management (admin-only surface).

use crate::error::{Error, Result};
use crate::ids;
use crate::page::{PageRequest, PaginatedResponse};
use crate::store::UserRepository;
use crate::user::{NewReviewer, User, UserRole};
use chrono::Utc;

/// Creates, lists, and deletes reviewer accounts.
///
/// Admin accounts are seed data: they cannot be created here and are
/// protected from deletion. Usernames and emails are unique
/// case-insensitively across all accounts.
#[derive(Clone)]
pub struct AccountDirectory<R: UserRepository> {
    repository: R,
}

impl<R: UserRepository> AccountDirectory<R> {
    pub fn new(repository: R) -> Self {
        AccountDirectory { repository }
    }

    /// Paginated account listing, optionally filtered by role.
    ///
    /// Store order (no sort is applied, matching the upstream contract).
    ///
    /// Future: `GET /api/users?role=reviewer&page=1`
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for zero `page`/`page_size`
    pub async fn list(
        &self,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<PaginatedResponse<User>> {
        page.validate()?;

        let filtered: Vec<User> = match role {
            Some(wanted) => self
                .repository
                .fetch_all()
                .await?
                .into_iter()
                .filter(|u| u.role == wanted)
                .collect(),
            None => self.repository.fetch_all().await?,
        };

        PaginatedResponse::slice(filtered, page)
    }

    /// Point lookup.
    ///
    /// Future: `GET /api/users/:id`
    ///
    /// # Errors
    /// - `Error::NotFound` if no account carries the id
    pub async fn get(&self, id: &str) -> Result<User> {
        self.repository
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))
    }

    /// Create a reviewer account.
    ///
    /// Username and email are required and checked case-insensitively
    /// against every existing account. The role is always `reviewer`.
    ///
    /// Future: `POST /api/users/reviewer` (credential generation and
    /// delivery happen server-side)
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for empty username or email
    /// - `Error::AlreadyExists` on duplicate username or email
    pub async fn create_reviewer(&self, form: NewReviewer) -> Result<User> {
        let username = form.username.trim();
        let email = form.email.trim();

        if username.is_empty() {
            return Err(Error::InvalidArgument("username is required".to_string()));
        }
        if email.is_empty() {
            return Err(Error::InvalidArgument("email is required".to_string()));
        }

        let existing = self.repository.fetch_all().await?;
        if existing
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username))
        {
            return Err(Error::AlreadyExists(format!("username {}", username)));
        }
        if existing.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(Error::AlreadyExists(format!("email {}", email)));
        }

        let user = User {
            id: ids::user_id(),
            username: username.to_string(),
            email: email.to_string(),
            role: UserRole::Reviewer,
            created_at: Utc::now(),
        };

        info!("Accounts CREATE reviewer {} ({})", user.username, user.id);
        self.repository.insert(user.clone()).await?;
        Ok(user)
    }

    /// Delete an account.
    ///
    /// Future: `DELETE /api/users/:id`
    ///
    /// # Errors
    /// - `Error::NotFound` if no account carries the id
    /// - `Error::Forbidden` if the target is an admin; the store is
    ///   left unchanged
    pub async fn delete(&self, id: &str) -> Result<()> {
        let user = self.get(id).await?;
        if user.role == UserRole::Admin {
            warn!("Accounts DELETE refused for admin {}", user.username);
            return Err(Error::Forbidden(format!(
                "cannot delete admin user {}",
                user.username
            )));
        }

        info!("Accounts DELETE {} ({})", user.username, id);
        self.repository.remove(id).await
    }

    /// Number of reviewer accounts.
    ///
    /// Future: `GET /api/users/count?role=reviewer`
    pub async fn reviewer_count(&self) -> Result<usize> {
        Ok(self
            .repository
            .fetch_all()
            .await?
            .iter()
            .filter(|u| u.role == UserRole::Reviewer)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryUserStore, UserRepository as _};

    fn seed_user(id: &str, username: &str, email: &str, role: UserRole) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    async fn seeded() -> (AccountDirectory<InMemoryUserStore>, InMemoryUserStore) {
        let store = InMemoryUserStore::new();
        store
            .insert(seed_user("user-admin", "admin", "admin@x.com", UserRole::Admin))
            .await
            .expect("Failed to insert");
        store
            .insert(seed_user(
                "user-john",
                "john.reviewer",
                "john@x.com",
                UserRole::Reviewer,
            ))
            .await
            .expect("Failed to insert");
        (AccountDirectory::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_reviewer() {
        let (directory, _) = seeded().await;

        let user = directory
            .create_reviewer(NewReviewer {
                username: "mona".to_string(),
                email: "mona@x.com".to_string(),
            })
            .await
            .expect("Failed to create reviewer");

        assert!(user.id.starts_with("user-"));
        assert_eq!(user.role, UserRole::Reviewer);
        assert_eq!(
            directory.reviewer_count().await.expect("Failed to count"),
            2
        );
    }

    #[tokio::test]
    async fn test_create_reviewer_duplicate_username_case_insensitive() {
        let (directory, _) = seeded().await;

        let err = directory
            .create_reviewer(NewReviewer {
                username: "John.Reviewer".to_string(),
                email: "new@x.com".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_reviewer_duplicate_email() {
        let (directory, _) = seeded().await;

        let err = directory
            .create_reviewer(NewReviewer {
                username: "someone.else".to_string(),
                email: "JOHN@X.COM".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_reviewer_requires_fields() {
        let (directory, _) = seeded().await;

        for (username, email) in [("", "a@x.com"), ("  ", "a@x.com"), ("ann", "")] {
            let err = directory
                .create_reviewer(NewReviewer {
                    username: username.to_string(),
                    email: email.to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[tokio::test]
    async fn test_delete_admin_forbidden_store_unchanged() {
        let (directory, store) = seeded().await;

        let err = directory.delete("user-admin").await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert_eq!(store.count().await.expect("Failed to count"), 2);
    }

    #[tokio::test]
    async fn test_delete_reviewer() {
        let (directory, store) = seeded().await;

        directory.delete("user-john").await.expect("Failed to delete");
        assert_eq!(store.count().await.expect("Failed to count"), 1);

        let err = directory.delete("user-john").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filtered_by_role() {
        let (directory, _) = seeded().await;

        let admins = directory
            .list(Some(UserRole::Admin), PageRequest::first())
            .await
            .expect("Failed to list");
        assert_eq!(admins.total, 1);
        assert_eq!(admins.data[0].username, "admin");

        let everyone = directory
            .list(None, PageRequest::first())
            .await
            .expect("Failed to list");
        assert_eq!(everyone.total, 2);
    }
}
