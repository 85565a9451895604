//! Get command - reads one property, raw or typed.

use jsonbind::{ConfigFile, Fault, FaultKind, tree::NodeKind};

use super::{CommandResult, JSON, navigate, parse_default, read_value, split_property};
use crate::cli::GetArgs;
use crate::output::{OutputFormat, print_value};

/// Run the get command
pub fn run(args: &GetArgs, format: OutputFormat) -> CommandResult {
    let config = ConfigFile::load(&args.file)?;
    let (parents, leaf) = split_property(&args.path)?;
    let parent = navigate(config.root(), &parents)?;
    let default = match (args.kind, &args.default) {
        (Some(kind), Some(text)) => Some(parse_default(&args.path, kind, text)?),
        _ => None,
    };

    let value = match args.kind {
        None => {
            let node = parent.get(leaf).ok_or_else(|| {
                Fault::new(
                    FaultKind::MissingProperty,
                    JSON.label(),
                    args.path.as_str(),
                    "value",
                    NodeKind::Undefined,
                )
            })?;
            node.to_value()
        }
        Some(kind) => match read_value(&parent, leaf, kind, default.is_some())? {
            Some(value) => value,
            None => {
                tracing::debug!(path = %args.path, "Using default value");
                default.unwrap_or_default()
            }
        },
    };

    print_value(&args.path, &value, format)?;
    Ok(())
}
