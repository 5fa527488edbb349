//! `watch` command: regenerate on file changes.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, mpsc},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use super::{
    args::{OutputFormat, WatchCommand},
    commands::{
        context::RunContext,
        generate::{render_artifact, write_artifact},
    },
    exit_status::ExitStatus,
    report,
};
use crate::{
    core::{
        file_type::is_supported_file,
        merge::{merge_file, merge_modules},
        pipeline::extract_files,
        source::{FsReader, SourceReader},
        watch::WatchCache,
    },
    utils::querymap_path,
};

/// Events arriving this close together are handled as one batch.
const BATCH_WINDOW: Duration = Duration::from_millis(50);

/// An artifact written by the session and the number of inputs behind it.
pub type Written = (PathBuf, usize);

/// Generation state of one watch run, independent of the notification source.
pub struct WatchSession {
    ctx: RunContext,
    cache: WatchCache,
    reader: Arc<dyn SourceReader>,
    /// Combined output; `None` in separate mode.
    output: Option<PathBuf>,
}

impl WatchSession {
    pub fn new(ctx: RunContext) -> Result<Self> {
        let output = if ctx.config.separate {
            None
        } else {
            match &ctx.output {
                Some(output) => Some(output.clone()),
                None => bail!("watch needs -o/--output unless -s/--separate is used"),
            }
        };
        let reader: Arc<dyn SourceReader> = Arc::new(FsReader);
        let cache = WatchCache::new(Arc::clone(&reader), ctx.options.clone());
        Ok(Self {
            ctx,
            cache,
            reader,
            output,
        })
    }

    /// Generate everything once.
    pub fn start(&mut self) -> Result<Vec<Written>> {
        let files = self.ctx.scan().files;
        match self.output.clone() {
            Some(output) => self.write_combined(&output, &files, None),
            None => {
                let outcome = extract_files(&files, &Default::default(), &self.reader, &self.ctx.options);
                for (_, err) in &outcome.errors {
                    report::print_watch_error(err);
                }
                let mut written = Vec::new();
                for (file, model) in merge_modules(&outcome.typings) {
                    let path = querymap_path(Path::new(&file), OutputFormat::DTs.suffix());
                    write_artifact(&path, &render_artifact(&model, self.ctx.config.export, OutputFormat::DTs)?)?;
                    written.push((path, 1));
                }
                Ok(written)
            }
        }
    }

    /// Regenerate after `changed` was created, modified or removed.
    pub fn handle_change(&mut self, changed: &Path) -> Result<Vec<Written>> {
        let files = self.ctx.scan().files;
        let known = find_input(&files, changed).cloned();

        match self.output.clone() {
            Some(output) => {
                let key = known.unwrap_or_else(|| changed.to_path_buf());
                self.write_combined(&output, &files, Some(key.as_path()))
            }
            None => {
                let Some(path) = known else {
                    return Ok(Vec::new());
                };
                let mut outcome = extract_files(
                    std::slice::from_ref(&path),
                    &Default::default(),
                    &self.reader,
                    &self.ctx.options,
                );
                if let Some((_, err)) = outcome.errors.pop() {
                    return Err(err.into());
                }
                let Some(map) = outcome.typings.values().next() else {
                    return Ok(Vec::new());
                };
                let target = querymap_path(&path, OutputFormat::DTs.suffix());
                let model = merge_file(map);
                write_artifact(&target, &render_artifact(&model, self.ctx.config.export, OutputFormat::DTs)?)?;
                Ok(vec![(target, 1)])
            }
        }
    }

    fn write_combined(
        &mut self,
        output: &Path,
        files: &[PathBuf],
        changed: Option<&Path>,
    ) -> Result<Vec<Written>> {
        let model = match changed {
            Some(changed) => self.cache.apply_change(changed, files)?,
            None => self.cache.refresh(files)?,
        };
        write_artifact(output, &render_artifact(&model, self.ctx.config.export, OutputFormat::DTs)?)?;
        Ok(vec![(output.to_path_buf(), files.len())])
    }

    pub fn is_relevant(&self, path: &Path) -> bool {
        is_supported_file(path, self.ctx.options.jsx_factory.is_some())
    }
}

/// The scanned path that names the same file as `changed`.
fn find_input<'a>(files: &'a [PathBuf], changed: &Path) -> Option<&'a PathBuf> {
    files.iter().find(|f| f.as_path() == changed).or_else(|| {
        let changed = fs::canonicalize(changed).ok()?;
        files
            .iter()
            .find(|f| fs::canonicalize(f).is_ok_and(|f| f == changed))
    })
}

pub fn watch(cmd: WatchCommand, cwd: &Path) -> Result<ExitStatus> {
    let ctx = RunContext::new(&cmd.common, cwd)?;
    let verbose = ctx.verbose;
    let roots = ctx.watch_roots();
    if roots.is_empty() {
        report::print_no_inputs();
        return Ok(ExitStatus::Failure);
    }

    let mut session = WatchSession::new(ctx)?;
    report_written(session.start());

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to start file watcher")?;
    for root in &roots {
        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;
    }
    report::print_watching(&roots);

    while let Ok(first) = rx.recv() {
        let mut changed = BTreeSet::new();
        collect_changes(first, &session, &mut changed);
        while let Ok(next) = rx.recv_timeout(BATCH_WINDOW) {
            collect_changes(next, &session, &mut changed);
        }

        for path in changed {
            report::print_changed(&path, verbose);
            report_written(session.handle_change(&path));
        }
    }

    Ok(ExitStatus::Success)
}

fn collect_changes(
    event: notify::Result<Event>,
    session: &WatchSession,
    changed: &mut BTreeSet<PathBuf>,
) {
    match event {
        Ok(event) => {
            if matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                changed.extend(event.paths.into_iter().filter(|p| session.is_relevant(p)));
            }
        }
        Err(err) => report::print_watch_error(&err),
    }
}

fn report_written(result: Result<Vec<Written>>) {
    match result {
        Ok(written) => {
            for (path, count) in written {
                report::print_written(&path, count);
            }
        }
        Err(err) => report::print_watch_error(&format!("{:#}", err)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::args::CommonArgs;

    struct Project {
        _dir: TempDir,
        root: PathBuf,
    }

    impl Project {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path().canonicalize().unwrap();
            fs::create_dir(root.join(".git")).unwrap();
            fs::create_dir(root.join("views")).unwrap();
            fs::write(root.join("views/a.html"), "<div id=\"a\"></div>").unwrap();
            fs::write(root.join("views/b.pug"), "span#b").unwrap();
            Self { _dir: dir, root }
        }

        fn session(&self, separate: bool) -> WatchSession {
            let args = CommonArgs {
                inputs: vec!["views".to_string()],
                output: (!separate).then(|| "q.d.ts".to_string()),
                separate,
                ..Default::default()
            };
            WatchSession::new(RunContext::new(&args, &self.root).unwrap()).unwrap()
        }

        fn read(&self, path: &str) -> String {
            fs::read_to_string(self.root.join(path)).unwrap()
        }
    }

    #[test]
    fn test_combined_requires_output() {
        let project = Project::new();
        let args = CommonArgs {
            inputs: vec!["views".to_string()],
            ..Default::default()
        };
        let ctx = RunContext::new(&args, &project.root).unwrap();
        assert!(WatchSession::new(ctx).is_err());
    }

    #[test]
    fn test_combined_regenerates_on_change() {
        let project = Project::new();
        let mut session = project.session(false);

        let written = session.start().unwrap();
        assert_eq!(written, vec![(project.root.join("q.d.ts"), 2)]);
        assert!(project.read("q.d.ts").contains("\"b\": HTMLSpanElement;"));

        let changed = project.root.join("views/b.pug");
        fs::write(&changed, "p#b").unwrap();
        session.handle_change(&changed).unwrap();
        let text = project.read("q.d.ts");
        assert!(text.contains("\"b\": HTMLParagraphElement;"));
        assert!(text.contains("\"a\": HTMLDivElement;"));

        fs::remove_file(&changed).unwrap();
        let written = session.handle_change(&changed).unwrap();
        assert_eq!(written[0].1, 1);
        assert!(!project.read("q.d.ts").contains("\"b\""));
    }

    #[test]
    fn test_broken_file_keeps_last_output() {
        let project = Project::new();
        let mut session = project.session(false);
        session.start().unwrap();
        let before = project.read("q.d.ts");

        let changed = project.root.join("views/b.pug");
        fs::write(&changed, "div\n    p\n  span").unwrap();
        assert!(session.handle_change(&changed).is_err());
        assert_eq!(project.read("q.d.ts"), before);
    }

    #[test]
    fn test_separate_mode_writes_only_changed_file() {
        let project = Project::new();
        let mut session = project.session(true);
        let written = session.start().unwrap();
        assert_eq!(written.len(), 2);
        assert!(project.read("views/a-querymap.d.ts").contains("\"a\": HTMLDivElement;"));

        let changed = project.root.join("views/a.html");
        fs::write(&changed, "<i id=\"a\"></i>").unwrap();
        let written = session.handle_change(&changed).unwrap();
        assert_eq!(written, vec![(project.root.join("views/a-querymap.d.ts"), 1)]);
        assert!(project.read("views/a-querymap.d.ts").contains("\"a\": HTMLElement;"));
    }

    #[test]
    fn test_relevant_paths() {
        let project = Project::new();
        let session = project.session(false);
        assert!(session.is_relevant(Path::new("x.pug")));
        assert!(!session.is_relevant(Path::new("q.d.ts")));
        assert!(!session.is_relevant(Path::new("bundle.js")));
    }
}
