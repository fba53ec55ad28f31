//! Credential handling and bearer tokens. Tokens are opaque v4 uuids
//! persisted per account; a request resolves to at most one account.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use entity::{access_token, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{Error, Mutation, Query, Result};

pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::Validation(format!("could not hash password: {err}")))
}

pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

impl Mutation {
    /// Verify credentials and mint a new bearer token.
    pub async fn create_token<C: ConnectionTrait>(
        db: &C,
        email: &str,
        password: &str,
    ) -> Result<Uuid> {
        let account = user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_ascii_lowercase()))
            .one(db)
            .await?
            .ok_or(Error::Unauthorized)?;

        if !account.is_active || !verify_password(password, &account.password_hash) {
            return Err(Error::Unauthorized);
        }

        let token = Uuid::new_v4();
        access_token::ActiveModel {
            token: Set(token),
            user_id: Set(account.id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::debug!(user_id = account.id, "minted access token");
        Ok(token)
    }
}

impl Query {
    /// Resolve a bearer token to its account.
    pub async fn user_by_token<C: ConnectionTrait>(
        db: &C,
        token: Uuid,
    ) -> Result<Option<user::Model>> {
        let found = access_token::Entity::find()
            .filter(access_token::Column::Token.eq(token))
            .find_also_related(user::Entity)
            .one(db)
            .await?;

        Ok(found
            .and_then(|(_, account)| account)
            .filter(|account| account.is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("sup3r-secret").unwrap();
        assert!(verify_password("sup3r-secret", &hash));
        assert!(!verify_password("not-the-password", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
