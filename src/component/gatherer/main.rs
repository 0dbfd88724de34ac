use super::capture_date::{DateRange, capture_date};
use super::duplicate_filter::{DuplicateCheck, DuplicateFilter};
use super::filename_cleaner::FilenameCleaner;
use super::output_tree::OutputTree;
use crate::config::{Config, FolderKind, GatherConfig, MediaKind};
use crate::tools::{FileInfo, Placement, ensure_directory_exists, place_file, scan_all_files};
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Statistics and warnings of one gather run
#[derive(Debug, Default, Clone)]
pub struct GatherResult {
    pub output_root: PathBuf,
    /// Files copied
    pub processed: usize,
    pub duplicates: usize,
    pub thumbnails_skipped: usize,
    pub out_of_range: usize,
    pub whatsapp_images: usize,
    pub whatsapp_videos: usize,
    pub regular_images: usize,
    pub regular_videos: usize,
    pub errors: usize,
    pub warnings: Vec<String>,
    pub interrupted: bool,
}

impl GatherResult {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }

    fn count_copy(&mut self, kind: FolderKind, media: MediaKind) {
        self.processed += 1;
        match (kind, media) {
            (FolderKind::WhatsappImages, _) => self.whatsapp_images += 1,
            (FolderKind::WhatsappVideos, _) => self.whatsapp_videos += 1,
            (FolderKind::ImageFolders, MediaKind::Video) => self.regular_videos += 1,
            (FolderKind::ImageFolders, MediaKind::Image) => self.regular_images += 1,
        }
    }
}

enum FileOutcome {
    Copied(MediaKind),
    Duplicate,
    Thumbnail,
    OutOfRange,
    NotMedia,
}

/// Collects media from the configured folders into a fresh output tree
pub struct Gatherer {
    config: Config,
    gather_config: GatherConfig,
    shutdown_signal: Arc<AtomicBool>,
    filename_cleaner: FilenameCleaner,
}

impl Gatherer {
    pub fn new(config: Config, gather_config: GatherConfig, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            gather_config,
            shutdown_signal,
            filename_cleaner: FilenameCleaner::new(),
        }
    }

    pub fn run(&self, range: DateRange) -> Result<GatherResult> {
        println!(
            "{}",
            style(format!(
                "=== Gathering media from {} to {} ===",
                range.from(),
                range.to()
            ))
            .cyan()
            .bold()
        );

        let result = self.gather(range)?;
        self.print_report(&result);

        Ok(result)
    }

    /// Runs the whole gather without printing the report.
    ///
    /// Fails only if the output tree cannot be created; per-file problems are
    /// counted in the result.
    pub fn gather(&self, range: DateRange) -> Result<GatherResult> {
        let tree = OutputTree::new(&self.gather_config.output, range.to());
        tree.create()?;
        info!("output directory: {}", tree.root().display());

        let mut result = GatherResult {
            output_root: tree.root().to_path_buf(),
            ..GatherResult::default()
        };
        let mut duplicates = DuplicateFilter::new();

        'kinds: for kind in FolderKind::all() {
            for folder in self.gather_config.folders_of(kind) {
                if self.shutdown_signal.load(Ordering::SeqCst) {
                    result.interrupted = true;
                    break 'kinds;
                }
                self.process_folder(folder, kind, range, &tree, &mut duplicates, &mut result);
            }
        }

        info!(
            "gather finished - copied: {}, distinct: {}, duplicates: {}, warnings: {}, errors: {}",
            result.processed,
            duplicates.len(),
            result.duplicates,
            result.warnings.len(),
            result.errors
        );

        Ok(result)
    }

    fn process_folder(
        &self,
        folder: &Path,
        kind: FolderKind,
        range: DateRange,
        tree: &OutputTree,
        duplicates: &mut DuplicateFilter,
        result: &mut GatherResult,
    ) {
        if !folder.exists() {
            result.warn(format!(
                "Warning: Input folder does not exist: {}",
                folder.display()
            ));
            return;
        }

        println!(
            "{}",
            style(format!(
                "Processing {} folder: {}",
                kind.section_name(),
                folder.display()
            ))
            .dim()
        );

        let files = match scan_all_files(folder) {
            Ok(files) => files,
            Err(e) => {
                result.warn(format!(
                    "Warning: Input folder could not be read: {}: {e:#}",
                    folder.display()
                ));
                return;
            }
        };

        let progress_bar = ProgressBar::new(files.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for file in &files {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("interrupted");
                result.interrupted = true;
                return;
            }

            match self.process_file(file, folder, kind, range, tree, duplicates, result) {
                Ok(FileOutcome::Copied(media)) => result.count_copy(kind, media),
                Ok(FileOutcome::Duplicate) => result.duplicates += 1,
                Ok(FileOutcome::Thumbnail) => result.thumbnails_skipped += 1,
                Ok(FileOutcome::OutOfRange) => result.out_of_range += 1,
                Ok(FileOutcome::NotMedia) => {}
                Err(e) => {
                    error!("failed to process {}: {e:#}", file.path.display());
                    result.errors += 1;
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
    }

    #[allow(clippy::too_many_arguments)]
    fn process_file(
        &self,
        file: &FileInfo,
        folder: &Path,
        kind: FolderKind,
        range: DateRange,
        tree: &OutputTree,
        duplicates: &mut DuplicateFilter,
        result: &mut GatherResult,
    ) -> Result<FileOutcome> {
        let Some(media) = self.config.media_type_table.media_kind(&file.path) else {
            return Ok(FileOutcome::NotMedia);
        };

        if is_sync_artifact(&file.path, folder) {
            debug!("skipping thumbnail/hidden file: {}", file.path.display());
            return Ok(FileOutcome::Thumbnail);
        }

        let file_name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let clean_name = self.filename_cleaner.clean(&file_name);

        let date = capture_date(&file.path, &clean_name)?;
        if !range.contains(date) {
            return Ok(FileOutcome::OutOfRange);
        }

        if let DuplicateCheck::DuplicateOf(original) = duplicates.check(&file.path)? {
            println!(
                "{}",
                style(format!(
                    "Ignoring duplicate: {} (original: {})",
                    file.path.display(),
                    original.display()
                ))
                .dim()
            );
            return Ok(FileOutcome::Duplicate);
        }

        if !self.filename_cleaner.is_canonical(&clean_name) {
            result.warn(format!(
                "Warning: Filename doesn't match YYYYMMDD_HHMMSS format or has unexpected extension: {clean_name}"
            ));
        }

        let dest_dir = tree.destination_dir(kind, media, date);
        ensure_directory_exists(&dest_dir)?;

        match place_file(&file.path, &dest_dir, &clean_name)? {
            Placement::Copied(dest) => {
                debug!("copied: {} -> {}", file.path.display(), dest.display());
                Ok(FileOutcome::Copied(media))
            }
            Placement::AlreadyPresent(dest) => {
                debug!("already present: {} == {}", file.path.display(), dest.display());
                Ok(FileOutcome::Duplicate)
            }
        }
    }

    fn print_report(&self, result: &GatherResult) {
        if !result.warnings.is_empty() {
            println!("\n{}", style("Warnings\n========").yellow().bold());
            for warning in &result.warnings {
                println!("{}", style(warning).yellow());
            }
        }

        println!("\nOutput folder: {}", result.output_root.display());

        let rule = "=".repeat(50);
        println!("\n{rule}");
        println!("{}", style("PROCESSING STATISTICS").cyan().bold());
        println!("{rule}");
        println!("Total files processed: {}", style(result.processed).green());
        println!("Duplicates skipped: {}", result.duplicates);
        println!("Thumbnails skipped: {}", result.thumbnails_skipped);
        println!("Outside date range: {}", result.out_of_range);
        println!("WhatsApp images: {}", result.whatsapp_images);
        println!("WhatsApp videos: {}", result.whatsapp_videos);
        println!("Regular images: {}", result.regular_images);
        println!("Regular videos: {}", result.regular_videos);
        println!("Warnings: {}", result.warnings.len());
        if result.errors > 0 {
            println!("Errors: {}", style(result.errors).red());
        }
        println!("{rule}");
        if result.interrupted {
            println!("{}", style("Interrupted before all folders were processed").yellow());
        }
    }
}

/// Hidden files and anything below a hidden folder such as `.thumbnails`
fn is_sync_artifact(path: &Path, base_dir: &Path) -> bool {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    relative.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}
