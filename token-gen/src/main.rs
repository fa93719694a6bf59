use anyhow::{Context, Result, bail};
use clap::Parser;
use notes_api::services::auth::TokenIssuer;

/// Mint an `auth-token` credential for local development.
///
/// Signs `{ "user": { "id": <user-id> }, iat, jti, exp? }` with the same HS256
/// secret the API verifies against. Production credentials come from the
/// identity provider, not from this tool.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// User id to embed as `user.id`
    #[arg(long)]
    user_id: String,

    /// Shared secret. Default: JWT_SECRET from the environment / .env
    #[arg(long)]
    secret: Option<String>,

    /// Token lifetime in seconds. Omit for a token without `exp`.
    #[arg(long)]
    ttl_seconds: Option<u64>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let secret = match args.secret {
        Some(secret) => secret,
        None => {
            dotenvy::dotenv().ok();
            std::env::var("JWT_SECRET").context("no --secret given and JWT_SECRET is not set")?
        }
    };
    if secret.is_empty() {
        bail!("secret must not be empty");
    }

    let issuer = TokenIssuer::new(secret.as_bytes(), args.ttl_seconds)?;
    let token = issuer.issue(&args.user_id)?;

    if args.quiet {
        println!("{token}");
        return Ok(());
    }

    println!("user.id: {}", args.user_id);
    match issuer.ttl_seconds() {
        Some(ttl) => println!("expires_in: {ttl}s"),
        None => println!("expires_in: never"),
    }
    println!();
    println!("auth-token: {token}");

    Ok(())
}
