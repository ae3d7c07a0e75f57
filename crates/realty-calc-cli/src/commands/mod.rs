pub mod fees;
pub mod loan;
pub mod regions;
pub mod rent;
pub mod tax;

use realty_calc_core::{CalcResult, ComputationOutput};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::input::{self, InputArgs};

pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;

/// Runs a calculator whose input only comes from `--input` or stdin.
pub fn run<I, O>(
    args: &InputArgs,
    command: &str,
    calculate: fn(&I) -> CalcResult<ComputationOutput<O>>,
) -> CommandResult
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = input::require(args, command)?;
    tracing::debug!(command, "running calculator");
    let output = calculate(&input)?;
    Ok(serde_json::to_value(output)?)
}

/// Parses a flag value through the enum's serde names, so Korean labels
/// and canonical names are both accepted.
pub fn parse_enum<T: DeserializeOwned>(flag: &str, raw: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| format!("--{flag}: unrecognised value '{raw}'"))
}
