//! # New Command Implementation
//!
//! This module implements the `new` subcommand, which creates a project
//! directory from a template.
//!
//! ## Functionality
//!
//! - **Template Resolution**: A template is a local template name (looked up
//!   under the templates directory), a path to a directory, a GitHub
//!   shorthand `owner/repo[/path][@ref]`, or a full contents API URL
//! - **Slots**: `[REPO_NAME]` and `[AUTHOR_NAME]` plus any `--slot` values and
//!   the template's own `stencil.yaml` manifest
//! - **Post-Scaffold Actions**: `--git` runs `git init`, `--install` runs the
//!   package manager for every lock file found in the template

use anyhow::{bail, Context, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use stencil::actions;
use stencil::config::{self, Manifest, ScaffoldConfig};
use stencil::defaults::{default_templates_dir, TEMPLATES_ENV, TOKEN_ENV};
use stencil::materialize::{Materializer, ScaffoldReport};
use stencil::output::{emoji, OutputConfig};
use stencil::source::{
    find_local_template, read_manifest, GitHubSource, LocalSource, RemoteLocation, TemplateSource,
};

/// Create a new project from a template
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name of the new project, substituted for [REPO_NAME]
    pub name: String,

    /// Template: local template name, directory path, owner/repo[/path][@ref], or contents API URL
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: String,

    /// Author name, substituted for [AUTHOR_NAME] (defaults to `git config user.name`)
    #[arg(short, long, value_name = "NAME")]
    pub author: Option<String>,

    /// Output directory (defaults to ./<NAME>)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Additional slot as TOKEN=VALUE (repeatable)
    #[arg(short, long = "slot", value_name = "TOKEN=VALUE", value_parser = parse_slot)]
    pub slots: Vec<(String, String)>,

    /// Glob selecting files that receive slot substitution (repeatable)
    #[arg(long = "slot-path", value_name = "GLOB")]
    pub slot_paths: Vec<String>,

    /// Manifest file to use instead of the template's stencil.yaml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub access token for remote templates
    #[arg(long, value_name = "TOKEN", env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Directory holding local templates
    #[arg(long, value_name = "PATH", env = TEMPLATES_ENV)]
    pub templates_dir: Option<PathBuf>,

    /// Run `git init` in the new project
    #[arg(long)]
    pub git: bool,

    /// Install packages for every lock file found in the template
    #[arg(long)]
    pub install: bool,

    /// Write into an existing, non-empty output directory
    #[arg(short, long)]
    pub force: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Where the template tree comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateRef {
    Local(PathBuf),
    Remote(String),
}

/// Execute the `new` command.
pub fn execute(args: NewArgs, output: &OutputConfig) -> Result<()> {
    let templates_dir = args
        .templates_dir
        .clone()
        .unwrap_or_else(default_templates_dir);
    let template = resolve_template(&args.template, &templates_dir)?;

    let target_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&args.name));
    ensure_writable(&target_dir, args.force)?;

    let author = match &args.author {
        Some(author) => author.clone(),
        None => resolve_author()?,
    };

    let mut scaffold = ScaffoldConfig::new(args.name.clone(), author);
    for (token, value) in &args.slots {
        scaffold = scaffold.with_slot(token.clone(), value.clone());
    }
    scaffold.slot_paths = args.slot_paths.clone();
    scaffold.access_token = args.token.clone();

    let manifest_override = args
        .config
        .as_ref()
        .map(|path| {
            config::from_file(path)
                .with_context(|| format!("Failed to read manifest {}", path.display()))
        })
        .transpose()?;

    if !args.quiet {
        println!(
            "{} Creating {} from {}",
            emoji(output, "📦", "[NEW]"),
            output.highlight(&args.name),
            args.template
        );
    }

    let report = match &template {
        TemplateRef::Local(root) => {
            scaffold_from(&LocalSource, root, &target_dir, scaffold, manifest_override)?
        }
        TemplateRef::Remote(url) => {
            let source = GitHubSource::with_token(args.token.clone())?;
            scaffold_from(&source, url, &target_dir, scaffold, manifest_override)?
        }
    };

    if !args.quiet {
        println!(
            "{} Created {} files in {}",
            emoji(output, "✅", "[OK]"),
            report.files_written,
            target_dir.display()
        );
    }

    if args.git {
        actions::initialize_git(&target_dir)?;
        if !args.quiet {
            println!("{} Initialized git repository", emoji(output, "🌱", "[GIT]"));
        }
    }

    if args.install {
        install(&report, args.quiet, output)?;
    } else if !args.quiet {
        for record in &report.package_map {
            println!(
                "{} Run `{} install` in {}",
                emoji(output, "💡", "[HINT]"),
                record.manager,
                record.path.display()
            );
        }
    }

    Ok(())
}

/// Apply the template's manifest (unless one was given explicitly) and
/// materialize the tree.
///
/// A manifest read from the template is not copied into the project.
fn scaffold_from<S: TemplateSource>(
    source: &S,
    root: &S::Node,
    target_dir: &Path,
    mut scaffold: ScaffoldConfig,
    manifest_override: Option<Manifest>,
) -> Result<ScaffoldReport> {
    // fail on bad names or slots before any request for the manifest
    scaffold.validate()?;
    let (manifest, from_template) = match manifest_override {
        Some(manifest) => (Some(manifest), false),
        None => (read_manifest(source, root)?, true),
    };
    if let Some(manifest) = &manifest {
        manifest.apply_to(&mut scaffold);
    }

    let mut materializer = Materializer::new(&scaffold)?;
    if from_template && manifest.is_some() {
        materializer = materializer.skip_template_manifest();
    }
    materializer.materialize(source, root, target_dir)?;
    Ok(materializer.finish())
}

fn install(report: &ScaffoldReport, quiet: bool, output: &OutputConfig) -> Result<()> {
    if report.package_map.is_empty() {
        if !quiet {
            println!(
                "{} No lock files found, nothing to install",
                emoji(output, "💡", "[HINT]")
            );
        }
        return Ok(());
    }

    for record in &report.package_map {
        let spinner = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!(
            "Installing packages with {} in {}",
            record.manager,
            record.path.display()
        ));

        let result = actions::install_packages(record.manager, &record.path);
        spinner.finish_and_clear();
        if let Err(e) = result {
            if !quiet {
                println!("{}", output.failure(format!("{} install failed", record.manager)));
            }
            return Err(e.into());
        }

        if !quiet {
            println!(
                "{} Installed packages with {} in {}",
                emoji(output, "📚", "[PKG]"),
                record.manager,
                record.path.display()
            );
        }
    }

    Ok(())
}

/// Decide where a template argument points.
///
/// URLs are remote. An existing directory is local. A bare name is a local
/// template under `templates_dir`. Anything else with a slash is GitHub
/// shorthand.
fn resolve_template(arg: &str, templates_dir: &Path) -> Result<TemplateRef> {
    if arg.starts_with("https://") || arg.starts_with("http://") {
        return Ok(TemplateRef::Remote(arg.to_string()));
    }

    let path = Path::new(arg);
    if path.is_dir() {
        return Ok(TemplateRef::Local(path.to_path_buf()));
    }

    if !arg.contains('/') {
        let template = find_local_template(templates_dir, arg)?;
        return Ok(TemplateRef::Local(template.path));
    }

    let location = RemoteLocation::parse(arg)?;
    Ok(TemplateRef::Remote(location.contents_url()?))
}

/// Refuse to scaffold over existing files unless forced.
fn ensure_writable(target_dir: &Path, force: bool) -> Result<()> {
    if target_dir.exists() {
        if !target_dir.is_dir() {
            bail!("Output path '{}' exists and is not a directory", target_dir.display());
        }
        let non_empty = std::fs::read_dir(target_dir)?.next().is_some();
        if non_empty && !force {
            bail!(
                "Output directory '{}' already exists and is not empty. Use --force to write into it.",
                target_dir.display()
            );
        }
    }
    Ok(())
}

/// Ask for the author on a terminal, otherwise fall back to git's user.name.
fn resolve_author() -> Result<String> {
    let git_name = git_user_name();

    if std::io::stdin().is_terminal() {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme).with_prompt("Author name");
        if let Some(name) = &git_name {
            input = input.default(name.clone());
        }
        return Ok(input.interact_text()?);
    }

    git_name.ok_or_else(|| {
        anyhow::anyhow!("No author given. Pass --author or set `git config user.name`.")
    })
}

fn git_user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "user.name"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Parse a `TOKEN=VALUE` slot argument. The value may contain `=`.
fn parse_slot(s: &str) -> std::result::Result<(String, String), String> {
    let (token, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid slot '{}': expected TOKEN=VALUE", s))?;
    if token.is_empty() {
        return Err(format!("invalid slot '{}': token must not be empty", s));
    }
    Ok((token.to_string(), value.to_string()))
}
