//! Command-line surface: two positional arguments, nothing else.

use clap::Parser;

/// Printed when the binary is started without arguments.
pub const USAGE: &str = "\
# RIPE Atlas to GELF forwarder
#
# Usage: atlas_gelf <measurement id> <timeframe in min>
#
# Example: atlas_gelf 12323 5
#
# Point ATLAS_GELF_HOST and ATLAS_GELF_PORT (environment or .env) at Graylog.
# Get an API key for geolocation from https://opencagedata.com and set OPENCAGE_API_KEY.";

/// Positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "atlas_gelf", version, about = "Forward RIPE Atlas results to Graylog")]
pub struct Cli {
    /// RIPE Atlas measurement id
    pub measurement_id: u64,

    /// Length of the time window in minutes, ending now
    pub minutes: u64,
}
