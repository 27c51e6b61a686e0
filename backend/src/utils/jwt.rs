use anyhow::anyhow;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use crate::{
    models::{Actor, Role},
    types::UserId,
};

/// Identity claims read from an access token issued elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: String,
    pub exp: i64, // expiration time
}

impl Claims {
    /// Resolves the caller the claims describe.
    pub fn actor(&self) -> anyhow::Result<Actor> {
        let id: UserId = self
            .sub
            .parse()
            .map_err(|_| anyhow!("Invalid subject claim: {}", self.sub))?;
        let role = Role::parse(&self.role).ok_or_else(|| anyhow!("Unknown role: {}", self.role))?;
        Ok(Actor { id, role })
    }
}

pub fn verify_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}
