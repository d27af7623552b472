use colored::Colorize;
use dspreset::ChangeRecord;

/// Print the per-control change report.
///
/// Attributes with a zero delta are omitted; a control with no changed
/// attributes still gets its header line. An empty plan prints a distinct
/// notice instead of an empty report.
pub fn print_changes(changes: &[ChangeRecord], preview: bool) {
    if changes.is_empty() {
        println!();
        println!("No controls selected for modification.");
        return;
    }

    let mode = if preview {
        "Preview of changes"
    } else {
        "Applied changes"
    };
    println!();
    println!("{}", mode.bold());
    println!("{}", "-".repeat(50));

    for change in changes {
        println!(
            "Control ID: {} (Type: {})",
            change.ident.cyan(),
            change.control_type
        );
        for (name, old, new) in change.changed_fields() {
            println!("  {name}: {old:>8.1} → {new:>8.1}");
        }
        println!("{}", "-".repeat(30));
    }
}
