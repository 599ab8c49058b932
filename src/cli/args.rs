use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "multable",
    version,
    about = "interactive multiplication-table generator",
    long_about = "Multable builds multiplication tables over a row range and a column range, validating every bound first.\n\nExamples:\n  multable --hs 1 --he 12 --vs 1 --ve 12\n  multable --hs -5 --he 5 --vs 3 --ve -3 -o table.html\n  multable --interactive --config ~/.multable/config.yml\n\nTip: Use --interactive to open several tables as tabs and save them as one HTML page."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "hs",
        visible_alias = "h-start",
        value_name = "N",
        allow_hyphen_values = true,
        help_heading = "Table",
        help = "First multiplier along the header row (columns)."
    )]
    pub h_start: Option<String>,

    #[arg(
        long = "he",
        visible_alias = "h-end",
        value_name = "N",
        allow_hyphen_values = true,
        help_heading = "Table",
        help = "Last multiplier along the header row."
    )]
    pub h_end: Option<String>,

    #[arg(
        long = "vs",
        visible_alias = "v-start",
        value_name = "N",
        allow_hyphen_values = true,
        help_heading = "Table",
        help = "First multiplier down the label column (rows)."
    )]
    pub v_start: Option<String>,

    #[arg(
        long = "ve",
        visible_alias = "v-end",
        value_name = "N",
        allow_hyphen_values = true,
        help_heading = "Table",
        help = "Last multiplier down the label column."
    )]
    pub v_end: Option<String>,

    #[arg(
        short = 'd',
        long = "dom",
        visible_alias = "domain",
        value_name = "MIN..MAX",
        allow_hyphen_values = true,
        help_heading = "Limits",
        help = "Allowed range for every bound (default -50..50)."
    )]
    pub domain: Option<String>,

    #[arg(
        short = 'm',
        long = "mc",
        visible_alias = "max-cells",
        value_name = "N",
        help_heading = "Limits",
        help = "Largest table to generate, in cells (default 10000)."
    )]
    pub max_cells: Option<String>,

    #[arg(
        short = 'a',
        long = "ae",
        visible_alias = "aggregate-errors",
        help_heading = "Output",
        help = "Report validation problems as one aggregated message."
    )]
    pub aggregate_errors: bool,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.multable/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "Session",
        help = "Read commands from stdin and keep every table in its own tab."
    )]
    pub interactive: bool,

    #[arg(
        short = 't',
        long = "tb",
        visible_alias = "tabs",
        help_heading = "Session",
        help = "Open the generated table in a tab (adds tab ids to the output)."
    )]
    pub tabs: bool,

    #[arg(
        long = "tsi",
        visible_alias = "timestamp-ids",
        help_heading = "Session",
        help = "Use timestamp-based tab ids."
    )]
    pub timestamp_ids: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write tables to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, xml, html)."
    )]
    pub output_format: Option<String>,
}
