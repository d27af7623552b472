use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dspreset::{plan_changes, Offsets, Preset};
use inquire::{Confirm, CustomType, Text};

use crate::utils::{file as file_utils, report};

#[derive(Args)]
pub struct NudgeArgs {
    /// .dspreset file to edit (prompted for when omitted)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Control types to modify (prompted per type when omitted)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// X offset (left/right)
    #[arg(long, allow_hyphen_values = true)]
    pub dx: Option<f64>,

    /// Y offset (up/down)
    #[arg(long, allow_hyphen_values = true)]
    pub dy: Option<f64>,

    /// Width change
    #[arg(long, allow_hyphen_values = true)]
    pub dw: Option<f64>,

    /// Height change
    #[arg(long, allow_hyphen_values = true)]
    pub dh: Option<f64>,

    /// Write the result here instead of overwriting the original (skips the backup)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Preview the changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Apply without the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

pub fn execute(args: NudgeArgs) -> Result<()> {
    let Some(path) = resolve_path(args.file.clone())? else {
        return Ok(());
    };
    let mut preset = Preset::load(&path)?;

    println!();
    println!("{}", "Available control types:".bold());
    for (name, count) in preset.type_index() {
        println!("- {}: {} found", name.cyan(), count);
    }

    let selected = select_types(&args.types, &preset)?;
    if selected.is_empty() {
        println!("No control types selected for modification.");
        return Ok(());
    }

    let offsets = resolve_offsets(&args)?;

    let (changes, mut stats) = plan_changes(&preset, &selected, offsets);
    report::print_changes(&changes, true);

    if stats.found == 0 {
        println!("No controls found for the selected types.");
        return Ok(());
    }
    if args.dry_run {
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new("Apply these changes?")
            .with_default(false)
            .prompt()
            .unwrap_or(false);
        if !confirmed {
            return Ok(());
        }
    }

    stats.modified = preset.apply(&changes)?;
    report::print_changes(&changes, false);
    file_utils::save_preset(&preset, &path, args.output.as_deref())?;

    println!();
    println!(
        "Found {}, modified {}, skipped {} control(s).",
        stats.found, stats.modified, stats.skipped
    );
    Ok(())
}

/// Resolve the target file, prompting when no path was given on the command
/// line. Returns `None` when the user types the exit sentinel.
fn resolve_path(arg: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = arg {
        return Ok(Some(path));
    }

    loop {
        let input = Text::new("Path to .dspreset file ('exit' to quit):").prompt()?;
        let trimmed = input.trim().trim_matches('"');
        if trimmed.eq_ignore_ascii_case("exit") {
            return Ok(None);
        }

        let path = PathBuf::from(trimmed);
        if path.extension().and_then(|s| s.to_str()) == Some(dspreset::EXTENSION) && path.exists()
        {
            return Ok(Some(path));
        }
        println!("{}", "Please enter a valid .dspreset file path".red());
    }
}

fn select_types(flags: &[String], preset: &Preset) -> Result<BTreeSet<String>> {
    if !flags.is_empty() {
        return Ok(flags.iter().cloned().collect());
    }

    let mut selected = BTreeSet::new();
    for (name, _) in preset.type_index() {
        let prompt = format!("Modify controls of type '{name}'?");
        if Confirm::new(&prompt)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
        {
            selected.insert(name.clone());
        }
    }
    Ok(selected)
}

fn resolve_offsets(args: &NudgeArgs) -> Result<Offsets> {
    if let (Some(dx), Some(dy), Some(dw), Some(dh)) = (args.dx, args.dy, args.dw, args.dh) {
        return Ok(Offsets::new(dx, dy, dw, dh));
    }

    println!();
    println!("Offset values (negative values move left/up or shrink):");
    Ok(Offsets::new(
        prompt_offset("X offset (left/right)", args.dx)?,
        prompt_offset("Y offset (up/down)", args.dy)?,
        prompt_offset("Width change", args.dw)?,
        prompt_offset("Height change", args.dh)?,
    ))
}

fn prompt_offset(label: &str, flag: Option<f64>) -> Result<f64> {
    if let Some(value) = flag {
        return Ok(value);
    }
    let value = CustomType::<f64>::new(&format!("{label}:"))
        .with_default(0.0)
        .with_error_message("Please enter a number")
        .prompt()?;
    Ok(value)
}
