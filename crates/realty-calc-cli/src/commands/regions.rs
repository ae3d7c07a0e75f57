use clap::Args;
use serde_json::json;

use realty_calc_core::tables::regions::{find_region, regulated_regions};

use super::CommandResult;

/// Arguments for the regulated-region listing
#[derive(Args)]
pub struct RegionsArgs {
    /// Look up one region by its full name, e.g. "서울 강남구"
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run_regions(args: RegionsArgs) -> CommandResult {
    match args.name {
        Some(ref name) => {
            let region =
                find_region(name).ok_or_else(|| format!("'{name}' is not a regulated region"))?;
            Ok(json!({ "result": region }))
        }
        None => Ok(json!({ "result": regulated_regions() })),
    }
}
