//! Command-line definitions for `distill_images` and `gather_images`

use crate::component::distiller::DistillRequest;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Select every nth image from given folders and copy them to an output folder.
#[derive(Parser, Debug, Clone)]
#[command(name = "distill_images", version)]
pub struct DistillArgs {
    /// List of input folders
    #[arg(long = "input-folders", num_args = 1.., required = true)]
    pub input_folders: Vec<PathBuf>,

    /// Take every nth image
    #[arg(short = 'n', value_name = "STEP", allow_negative_numbers = true)]
    pub step: i64,

    /// Position of the first image taken in each folder
    #[arg(short = 'o', value_name = "OFFSET", default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Folder where selected images will be copied
    #[arg(long)]
    pub output_folder: PathBuf,

    /// Consider every regular file, not only images
    #[arg(long)]
    pub all_files: bool,
}

impl From<DistillArgs> for DistillRequest {
    fn from(args: DistillArgs) -> Self {
        Self {
            input_folders: args.input_folders,
            step: args.step,
            offset: args.offset,
            output_folder: args.output_folder,
            all_files: args.all_files,
        }
    }
}

/// Organize images and videos from various folders with date filtering and deduplication
#[derive(Parser, Debug, Clone)]
#[command(name = "gather_images", version)]
pub struct GatherArgs {
    /// Start date in YYYY-MM-DD format
    #[arg(long, value_parser = parse_date)]
    pub from_date: NaiveDate,

    /// End date in YYYY-MM-DD format (default: yesterday)
    #[arg(long, value_parser = parse_date)]
    pub to_date: Option<NaiveDate>,

    /// Path to configuration file
    #[arg(long, default_value = "config.ini")]
    pub config: PathBuf,
}

impl GatherArgs {
    /// `--to-date`, or the day before `today`
    #[must_use]
    pub fn to_date_or_yesterday(&self, today: NaiveDate) -> NaiveDate {
        self.to_date
            .unwrap_or_else(|| today.pred_opt().unwrap_or(today))
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format: {value}. Use YYYY-MM-DD"))
}
