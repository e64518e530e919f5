// generate_token.rs
// Utility to mint a bearer token for calling the API locally
//
// Usage: generate_token <client-id> [SCOPE ...]
// With no scopes, every scope is granted.

#[path = "auth/claims.rs"]
mod claims;

use chrono::{Duration, Utc};
use claims::{Claims, ALL_SCOPES};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::env;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let secret = env::var("JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set to mint a token"))?;

    let mut args = env::args().skip(1);
    let client_id = args.next().unwrap_or_else(|| "local-client".to_string());
    let scopes: Vec<String> = args.collect();

    let scope = if scopes.is_empty() {
        ALL_SCOPES.join(" ")
    } else {
        for scope in &scopes {
            if !ALL_SCOPES.contains(&scope.as_str()) {
                anyhow::bail!("unknown scope {}; expected one of {}", scope, ALL_SCOPES.join(", "));
            }
        }
        scopes.join(" ")
    };

    let claims = Claims {
        sub: client_id,
        exp: (Utc::now() + Duration::hours(12)).timestamp() as usize,
        scope,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    println!("{}", token);
    Ok(())
}
