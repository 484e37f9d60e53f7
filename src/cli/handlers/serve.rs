use crate::graphql::{PantryApi, run_server};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_serve(mut ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if let Some(port) = port {
        ctx.config.server.port = port;
    }

    let addr = ctx.config.server_addr();
    let api = PantryApi::new(&ctx.config, &ctx.root)?;

    println!("{} GraphQL server on http://{}/graphql", "Starting".green(), addr);
    println!("  GraphiQL: http://{}/", addr);
    println!(
        "  Database: {}",
        ctx.config.database_path(&ctx.root).display()
    );

    tokio::runtime::Runtime::new()?.block_on(run_server(api, &addr))?;
    Ok(())
}
