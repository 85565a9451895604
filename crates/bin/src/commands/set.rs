//! Set command - writes one typed property and saves the file.

use jsonbind::{ConfigFile, config::ConfigOrigin};

use super::{CommandResult, navigate_or_create, split_property, write_value};
use crate::cli::SetArgs;
use crate::output::{OutputFormat, print_value};

/// Run the set command
pub fn run(args: &SetArgs, format: OutputFormat) -> CommandResult {
    let config = ConfigFile::load_or_empty(&args.file)?;
    let (parents, leaf) = split_property(&args.path)?;

    let parent = navigate_or_create(config.root(), &parents)?;
    let stored = write_value(&parent, leaf, args.kind, &args.value)?;
    config.save()?;

    if config.origin() == ConfigOrigin::Empty {
        tracing::info!(file = %args.file.display(), "Created configuration file");
    }
    tracing::debug!(path = %args.path, value = %stored, "Stored value");

    let value = parent
        .get(leaf)
        .map(|node| node.to_value())
        .unwrap_or_default();
    print_value(&args.path, &value, format)?;
    Ok(())
}
