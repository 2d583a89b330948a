use anyhow::Result;
use rosterd::cli::{actions, actions::Action, start};

#[tokio::main]
async fn main() -> Result<()> {
    let action = start()?;

    match action {
        Action::Server(args) => actions::server::execute(*args).await?,
    }

    Ok(())
}
