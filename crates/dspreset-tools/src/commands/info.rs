use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, Table};
use dspreset::Preset;
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
struct PresetSummary<'a> {
    file: String,
    controls: usize,
    control_types: Vec<TypeCount<'a>>,
}

#[derive(Serialize)]
struct TypeCount<'a> {
    name: &'a str,
    count: usize,
}

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let preset = Preset::load(file)?;

    match format {
        OutputFormat::Text => output_text(file, &preset),
        OutputFormat::Json => output_json(file, &preset),
    }
}

fn output_text(file: &Path, preset: &Preset) -> Result<()> {
    println!("{}", "Preset Summary".bold());

    let mut summary_table = Table::new();
    summary_table.load_preset(UTF8_FULL_CONDENSED);
    summary_table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    summary_table.add_row(vec![
        Cell::new("File").fg(Color::Cyan),
        Cell::new(file.display().to_string()),
    ]);
    summary_table.add_row(vec![
        Cell::new("Controls").fg(Color::Cyan),
        Cell::new(preset.control_count().to_string()),
    ]);
    println!("{summary_table}");

    if preset.type_index().is_empty() {
        println!("No control elements found in the preset.");
        return Ok(());
    }

    println!();
    println!("{}", "Control Types".bold());

    let mut types_table = Table::new();
    types_table.load_preset(UTF8_FULL_CONDENSED);
    types_table.set_header(vec![
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Count").fg(Color::Cyan),
    ]);
    for (name, count) in preset.type_index() {
        types_table.add_row(vec![Cell::new(name), Cell::new(count.to_string())]);
    }
    println!("{types_table}");

    Ok(())
}

fn output_json(file: &Path, preset: &Preset) -> Result<()> {
    let summary = PresetSummary {
        file: file.display().to_string(),
        controls: preset.control_count(),
        control_types: preset
            .type_index()
            .iter()
            .map(|(name, count)| TypeCount {
                name,
                count: *count,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
