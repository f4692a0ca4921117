use std::path::PathBuf;

use clap::Parser;

/// Interactive insurance-cost dashboard.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dataset loaded at startup (.csv, .json or .parquet).
    #[arg(long, env = "INSURANCE_DATA", default_value = "insurance.csv")]
    pub data: PathBuf,

    /// Number of histogram bins.
    #[arg(
        long,
        env = "INSURANCE_BINS",
        default_value_t = 20,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub bins: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn explicit_flags() {
        let args = Args::try_parse_from(["insurance-dashboard", "--data", "x.parquet", "--bins", "35"])
            .unwrap();
        assert_eq!(args.data, PathBuf::from("x.parquet"));
        assert_eq!(args.bins, 35);
    }

    #[test]
    fn zero_bins_rejected() {
        assert!(Args::try_parse_from(["insurance-dashboard", "--bins", "0"]).is_err());
    }
}
