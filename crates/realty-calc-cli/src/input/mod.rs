pub mod file;
pub mod stdin;

use clap::Args;
use serde::de::DeserializeOwned;

/// Input source shared by every calculator subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Path to a JSON or YAML input file (otherwise JSON is read from stdin)
    #[arg(long)]
    pub input: Option<String>,
}

/// Typed input from `--input`, then stdin. `None` when neither is given so
/// callers can fall back to per-field flags.
pub fn load<T: DeserializeOwned>(
    args: &InputArgs,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let value = match args.input {
        Some(ref path) => Some(file::read_value(path)?),
        None => stdin::read_stdin()?,
    };
    match value {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Like [`load`], for calculators without per-field flags.
pub fn require<T: DeserializeOwned>(
    args: &InputArgs,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    load(args)?.ok_or_else(|| format!("--input <file> or stdin required for {command}").into())
}
