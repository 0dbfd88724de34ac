use super::selection::Selection;
use crate::config::Config;
use crate::tools::{
    FileInfo, Placement, ensure_writable_directory, list_folder_files, place_file,
    validate_directory_exists,
};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One distill run as given on the command line
#[derive(Debug, Clone)]
pub struct DistillRequest {
    pub input_folders: Vec<PathBuf>,
    pub step: i64,
    pub offset: i64,
    pub output_folder: PathBuf,
    /// List every regular file instead of images only
    pub all_files: bool,
}

/// Counts for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DistillResult {
    pub folders_scanned: usize,
    pub skipped_folders: usize,
    pub files_seen: usize,
    pub selected: usize,
    pub copied: usize,
    /// Identical file already in the output folder
    pub already_present: usize,
    pub errors: usize,
    pub interrupted: bool,
}

pub struct Distiller {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl Distiller {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self, request: &DistillRequest) -> Result<DistillResult> {
        println!("{}", style("=== Distill images ===").cyan().bold());

        let result = self.distill(request)?;
        self.print_summary(request, &result);

        Ok(result)
    }

    /// Selects and copies without printing the summary.
    ///
    /// Invalid step/offset and an unusable output folder fail before anything is
    /// copied; everything after that is reported per file.
    pub fn distill(&self, request: &DistillRequest) -> Result<DistillResult> {
        let selection = Selection::new(request.step, request.offset)?;

        ensure_writable_directory(&request.output_folder).with_context(|| {
            format!(
                "cannot use output folder {}",
                request.output_folder.display()
            )
        })?;

        info!(
            "distilling {} folder(s), every {} starting at {} -> {}",
            request.input_folders.len(),
            selection.step(),
            selection.offset(),
            request.output_folder.display()
        );

        let mut result = DistillResult::default();
        let selected = self.collect_selection(request, selection, &mut result);
        result.selected = selected.len();

        self.copy_selected(&selected, request, &mut result);

        info!(
            "distill finished - selected: {}, copied: {}, already present: {}, errors: {}",
            result.selected, result.copied, result.already_present, result.errors
        );

        Ok(result)
    }

    fn collect_selection(
        &self,
        request: &DistillRequest,
        selection: Selection,
        result: &mut DistillResult,
    ) -> Vec<FileInfo> {
        let mut selected = Vec::new();

        for folder in &request.input_folders {
            if let Err(e) = validate_directory_exists(folder) {
                warn!("skipping input folder: {e}");
                println!(
                    "{}",
                    style(format!("Skipping non-existent folder: {}", folder.display())).yellow()
                );
                result.skipped_folders += 1;
                continue;
            }

            let files = match list_folder_files(folder) {
                Ok(files) => files,
                Err(e) => {
                    warn!("skipping unreadable folder {}: {e:#}", folder.display());
                    result.skipped_folders += 1;
                    continue;
                }
            };

            let images: Vec<FileInfo> = files
                .into_iter()
                .filter(|f| {
                    request.all_files || self.config.media_type_table.is_image_file(&f.path)
                })
                .collect();

            let picked = selection.pick(&images);
            debug_assert_eq!(picked.len(), selection.expected_count(images.len()));
            debug!(
                "{}: {} image(s), {} selected",
                folder.display(),
                images.len(),
                picked.len()
            );

            result.folders_scanned += 1;
            result.files_seen += images.len();
            selected.extend(picked.into_iter().cloned());
        }

        selected
    }

    fn copy_selected(
        &self,
        selected: &[FileInfo],
        request: &DistillRequest,
        result: &mut DistillResult,
    ) {
        let progress_bar = ProgressBar::new(selected.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar.set_message("copying...");

        for file in selected {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("interrupted");
                result.interrupted = true;
                return;
            }

            let Some(file_name) = file.path.file_name().map(|n| n.to_string_lossy().into_owned())
            else {
                result.errors += 1;
                progress_bar.inc(1);
                continue;
            };

            match place_file(&file.path, &request.output_folder, &file_name) {
                Ok(Placement::Copied(dest)) => {
                    debug!("copied: {} -> {}", file.path.display(), dest.display());
                    result.copied += 1;
                }
                Ok(Placement::AlreadyPresent(dest)) => {
                    debug!("already present: {} == {}", file.path.display(), dest.display());
                    result.already_present += 1;
                }
                Err(e) => {
                    error!("failed to copy {}: {e:#}", file.path.display());
                    result.errors += 1;
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("done");
    }

    fn print_summary(&self, request: &DistillRequest, result: &DistillResult) {
        println!();
        println!("{}", style("=== Distill summary ===").cyan().bold());
        println!("  Folders scanned: {}", result.folders_scanned);
        if result.skipped_folders > 0 {
            println!("  Folders skipped: {}", style(result.skipped_folders).yellow());
        }
        println!("  Files seen:      {}", result.files_seen);
        println!("  Selected:        {}", result.selected);
        println!("  Copied:          {}", style(result.copied).green());
        if result.already_present > 0 {
            println!("  Already present: {}", style(result.already_present).dim());
        }
        if result.errors > 0 {
            println!("  Errors:          {}", style(result.errors).red());
        }
        if result.interrupted {
            println!("{}", style("Interrupted before all files were copied").yellow());
        }
        println!("  Output folder:   {}", request.output_folder.display());
    }
}
