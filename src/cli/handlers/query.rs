use crate::graphql::PantryApi;
use anyhow::Result;

use super::{CommandContext, parse_variables};

pub fn handle_query(ctx: CommandContext, query: String, variables: Option<String>) -> Result<()> {
    let api = PantryApi::new(&ctx.config, &ctx.root)?;
    let vars = parse_variables(variables)?;

    let request = async_graphql::Request::new(query).variables(vars);
    let response = tokio::runtime::Runtime::new()?.block_on(api.execute(request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
