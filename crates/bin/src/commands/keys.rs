//! Keys command - lists the entries of an object with their node kinds.

use jsonbind::ConfigFile;

use super::{CommandResult, navigate, split_path};
use crate::cli::KeysArgs;
use crate::output::{OutputFormat, print_table};

/// Run the keys command
pub fn run(args: &KeysArgs, format: OutputFormat) -> CommandResult {
    let config = ConfigFile::load(&args.file)?;
    let segments = match &args.path {
        Some(path) => split_path(path)?,
        None => Vec::new(),
    };
    let node = navigate(config.root(), &segments)?;

    let entries: Vec<(String, String)> = node
        .entries()
        .into_iter()
        .filter(|(_, child)| !child.is_comment())
        .map(|(key, child)| (key, child.kind().to_string()))
        .collect();

    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = entries
                .into_iter()
                .map(|(key, kind)| vec![key, kind])
                .collect();
            print_table(&["KEY", "KIND"], &rows);
        }
        OutputFormat::Json => {
            let value: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(key, kind)| (key, serde_json::Value::from(kind)))
                .collect();
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
