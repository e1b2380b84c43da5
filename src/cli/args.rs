// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// heredity - Exact posterior gene and trait probabilities for a family
pub struct Args {
    /// family record file (.csv with header name,mother,father,trait; .tsv also accepted)
    #[argh(positional)]
    pub family: Option<String>,

    /// write the report to this file instead of standard output
    #[argh(option)]
    pub output: Option<String>,

    /// output format: text, tsv, csv, json (default: text)
    #[argh(option)]
    pub format: Option<String>,

    /// decimal places shown in text/tsv/csv reports (default: 4)
    #[argh(option)]
    pub precision: Option<usize>,

    /// number of worker threads; more than one enables parallel enumeration (default: 1)
    #[argh(option)]
    pub threads: Option<usize>,

    /// refuse families larger than this many persons (default: 12)
    #[argh(option)]
    pub max_persons: Option<usize>,

    /// override the mutation probability of the network
    #[argh(option)]
    pub mutation: Option<f64>,

    /// show a progress bar during enumeration
    #[argh(switch)]
    pub progress: bool,

    /// report only persons whose name matches this regex
    #[argh(option)]
    pub include_persons: Option<String>,

    /// omit persons whose name matches this regex from the report
    #[argh(option)]
    pub exclude_persons: Option<String>,

    /// validate inputs without running inference (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
