//! Token verification command handler

use chrono::{TimeZone, Utc};

use crate::config::Config;
use crate::services::TokenIssuer;

pub fn cmd_verify_token(config: &Config, token: &str) -> anyhow::Result<()> {
    config.validate()?;

    let issuer = TokenIssuer::from_config(&config.security);
    let claims = issuer.decode(token)?;

    let expires = Utc
        .timestamp_opt(claims.exp, 0)
        .single()
        .map_or_else(|| claims.exp.to_string(), |t| t.to_rfc3339());

    println!("✓ Token valid");
    println!("  Username: {}", claims.username);
    println!("  Expires:  {}", expires);

    Ok(())
}
