use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};

use super::super::{
    args::{GenerateCommand, OutputFormat},
    exit_status::ExitStatus,
    report,
};
use super::context::RunContext;
use crate::{
    core::{
        merge::{merge_flat, merge_modules},
        model::OutputModel,
        pipeline::extract_files,
        source::{FsReader, SourceReader},
    },
    utils::querymap_path,
};

pub fn generate(cmd: GenerateCommand, cwd: &Path) -> Result<ExitStatus> {
    let ctx = RunContext::new(&cmd.common, cwd)?;
    let scan = ctx.scan();
    report::print_skipped(scan.skipped_count, ctx.verbose);
    if scan.files.is_empty() {
        report::print_no_inputs();
        return Ok(ExitStatus::Failure);
    }

    let reader: Arc<dyn SourceReader> = Arc::new(FsReader);
    let outcome = extract_files(&scan.files, &Default::default(), &reader, &ctx.options);
    if !outcome.errors.is_empty() {
        report::print_errors(&outcome.errors);
        return Ok(ExitStatus::Error);
    }

    let export = ctx.config.export;
    if cmd.stdout {
        print!("{}", render_artifact(&merge_flat(&outcome.typings), export, cmd.format)?);
        return Ok(ExitStatus::Success);
    }

    if ctx.config.separate {
        for (file, model) in merge_modules(&outcome.typings) {
            let path = querymap_path(Path::new(&file), cmd.format.suffix());
            write_artifact(&path, &render_artifact(&model, export, cmd.format)?)?;
            report::print_written(&path, 1);
        }
        return Ok(ExitStatus::Success);
    }

    let path = combined_output(&ctx, &scan.files, cmd.format)?;
    let model = merge_flat(&outcome.typings);
    write_artifact(&path, &render_artifact(&model, export, cmd.format)?)?;
    report::print_inputs(&scan.files, ctx.verbose);
    report::print_written(&path, scan.files.len());

    Ok(ExitStatus::Success)
}

/// Output path in combined mode. A lone input defaults to its own querymap.
pub(crate) fn combined_output(
    ctx: &RunContext,
    files: &[PathBuf],
    format: OutputFormat,
) -> Result<PathBuf> {
    match (&ctx.output, files) {
        (Some(output), _) => Ok(output.clone()),
        (_, [single]) => Ok(querymap_path(single, format.suffix())),
        _ => bail!(
            "{} input files found: pass -o/--output or use -s/--separate",
            files.len()
        ),
    }
}

pub(crate) fn render_artifact(
    model: &OutputModel,
    export: bool,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::DTs => Ok(model.to_declarations(export)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(model).context("Failed to serialize typings")?;
            json.push('\n');
            Ok(json)
        }
    }
}

pub(crate) fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
