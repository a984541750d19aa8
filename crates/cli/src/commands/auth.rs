//! Session commands: login, logout, whoami.

use secrecy::SecretString;

use partsgrid_core::Email;
use partsgrid_client::services::auth::AuthService;

use super::{CliContext, CliError};

/// Log in and persist the session cookie.
pub async fn login(
    ctx: &CliContext,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let password = password
        .or_else(|| std::env::var("PARTSGRID_PASSWORD").ok())
        .map(SecretString::from)
        .ok_or_else(|| {
            CliError::InvalidArgument(
                "no password given (use --password or PARTSGRID_PASSWORD)".to_string(),
            )
        })?;

    let auth = AuthService::new(&ctx.client, &ctx.jar);
    let session = auth
        .login(&email, &password)
        .await
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    println!("Logged in as {email}");
    if let Some(role) = session.role {
        println!("Role:    {role}");
    }
    if let Some(dealer_id) = session.dealer_id {
        println!("Dealer:  {dealer_id}");
    }
    println!("Expires: {}", session.expires_at);
    Ok(())
}

/// Log out (best-effort server call, local cookies always cleared).
pub async fn logout(ctx: &CliContext) {
    let auth = AuthService::new(&ctx.client, &ctx.jar);
    auth.logout().await;
    println!("Logged out");
}

/// Show the current session, fetching the profile when one exists.
pub async fn whoami(ctx: &CliContext) -> Result<(), CliError> {
    let auth = AuthService::new(&ctx.client, &ctx.jar);
    let Some(session) = auth.current_session() else {
        println!("Not logged in");
        return Ok(());
    };

    println!("Session expires: {}", session.expires_at);
    match auth.profile().await {
        Ok(profile) => {
            println!("Name:  {}", profile.name);
            println!("Email: {}", profile.email);
            println!("Role:  {}", profile.role);
            if let Some(dealer_id) = profile.dealer_id {
                println!("Dealer: {dealer_id}");
            }
        }
        Err(err) if err.is_auth_failure() => {
            println!("Session no longer accepted by the backend; run `pg-cli login`");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
