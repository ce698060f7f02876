use clap::Parser;
use std::path::PathBuf;

/// Track disciplinary fines for a team
#[derive(Parser, Debug)]
#[command(name = "fine-ledger")]
#[command(about = "Track disciplinary fines for a team", long_about = None)]
pub struct CliArgs {
    /// Directory holding players.csv, reasons.csv and fines.csv
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "data",
        help = "Directory holding the players, reasons and fines CSV tables"
    )]
    pub data_dir: PathBuf,

    /// Where the charts command writes its SVG
    #[arg(
        long = "charts-out",
        value_name = "FILE",
        default_value = "fines_charts.svg",
        help = "Output path of the bar/pie chart SVG"
    )]
    pub charts_out: PathBuf,
}
