use crate::graphql::sdl;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn handle_schema(output: Option<PathBuf>) -> Result<()> {
    let sdl = sdl();
    match output {
        Some(path) => std::fs::write(&path, sdl)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?,
        None => print!("{}", sdl),
    }
    Ok(())
}
