use crate::cli::{
    actions::{server, Action},
    commands,
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Build the [`Action`] from parsed arguments.
///
/// # Errors
///
/// Returns an error if a required argument is missing from the matches.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let args = server::Args {
        port: matches
            .get_one::<u16>(commands::ARG_PORT)
            .copied()
            .unwrap_or(8080),
        dsn: matches
            .get_one::<String>(commands::ARG_DSN)
            .cloned()
            .context("missing required argument: --dsn")?,
        cors_origin: matches
            .get_one::<String>(commands::ARG_CORS_ORIGIN)
            .cloned()
            .context("missing required argument: --cors-origin")?,
        token_signing_key: matches
            .get_one::<String>(commands::auth::ARG_TOKEN_SIGNING_KEY)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --token-signing-key")?,
        token_ttl_seconds: matches
            .get_one::<i64>(commands::auth::ARG_TOKEN_TTL_SECONDS)
            .copied()
            .unwrap_or(1800),
        refresh_ttl_seconds: matches
            .get_one::<i64>(commands::auth::ARG_REFRESH_TTL_SECONDS)
            .copied()
            .unwrap_or(604_800),
    };

    Ok(Action::Server(Box::new(args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn handler_builds_server_action() {
        let matches = commands::new().get_matches_from(vec![
            "rosterd",
            "--dsn",
            "postgres://localhost/rosterd",
            "--token-signing-key",
            "super-secret",
            "--token-ttl-seconds",
            "120",
        ]);

        let Action::Server(args) = handler(&matches).expect("action");
        assert_eq!(args.port, 8080);
        assert_eq!(args.dsn, "postgres://localhost/rosterd");
        assert_eq!(args.token_signing_key.expose_secret(), "super-secret");
        assert_eq!(args.token_ttl_seconds, 120);
        assert_eq!(args.refresh_ttl_seconds, 604_800);
    }
}
