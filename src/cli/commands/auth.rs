use clap::{Arg, Command};

pub const ARG_TOKEN_SIGNING_KEY: &str = "token-signing-key";
pub const ARG_TOKEN_TTL_SECONDS: &str = "token-ttl-seconds";
pub const ARG_REFRESH_TTL_SECONDS: &str = "refresh-ttl-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_TOKEN_SIGNING_KEY)
                .long("token-signing-key")
                .help("Symmetric key used to sign and verify bearer tokens")
                .env("ROSTERD_TOKEN_SIGNING_KEY")
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL_SECONDS)
                .long("token-ttl-seconds")
                .help("Bearer token lifetime in seconds")
                .default_value("1800")
                .env("ROSTERD_TOKEN_TTL_SECONDS")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_REFRESH_TTL_SECONDS)
                .long("refresh-ttl-seconds")
                .help("Refresh session lifetime in seconds")
                .default_value("604800")
                .env("ROSTERD_REFRESH_TTL_SECONDS")
                .value_parser(clap::value_parser!(i64)),
        )
}
