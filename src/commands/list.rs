//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which shows the local
//! templates available to `stencil new --template <NAME>`. Every
//! sub-directory of the templates directory is one template.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use stencil::defaults::{default_templates_dir, TEMPLATES_ENV};
use stencil::output::{emoji, OutputConfig};
use stencil::source::list_local_templates;

/// List the local templates
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory holding local templates
    #[arg(long, value_name = "PATH", env = TEMPLATES_ENV)]
    pub templates_dir: Option<PathBuf>,

    /// Print full template paths
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, output: &OutputConfig) -> Result<()> {
    let templates_dir = args.templates_dir.unwrap_or_else(default_templates_dir);

    let mut templates = if templates_dir.is_dir() {
        list_local_templates(&templates_dir)?
    } else {
        Vec::new()
    };

    if templates.is_empty() {
        println!(
            "{} No templates found in {}",
            emoji(output, "📭", "[EMPTY]"),
            templates_dir.display()
        );
        return Ok(());
    }

    // display order only; directory enumeration order is platform-defined
    templates.sort_by(|a, b| a.name.cmp(&b.name));

    println!(
        "{} Templates in {}:",
        emoji(output, "📂", "[DIR]"),
        templates_dir.display()
    );
    for template in &templates {
        if args.verbose {
            println!("  {}  {}", output.highlight(&template.name), template.path.display());
        } else {
            println!("  {}", output.highlight(&template.name));
        }
    }

    Ok(())
}
