//! ═══════════════════════════════════════════════════════════════════════════════
//! DISPLAY — Terminal Output Formatting
//! ═══════════════════════════════════════════════════════════════════════════════

use colored::*;

use qualia_space::{ActivityChange, ComplexView, QualiaPoint};

use crate::plot::PlotGrid;

/// Turn color output on or off for the whole process
pub fn set_color(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

/// Display welcome banner
pub fn welcome() {
    println!();
    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  QUALIA SPACE — same inputs, different structure".bright_white().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();
    println!(
        "Enter {} to move a slider. Commands: {} {} {} {} {}",
        "<complex> <element> <level>".green(),
        "/show".yellow(),
        "/plot".yellow(),
        "/reset".yellow(),
        "/help".yellow(),
        "/quit".yellow()
    );
    println!();
}

/// One complex as a card: header, activity bars, point
pub fn complex_card(view: &ComplexView) {
    println!();
    println!("{} {}", "■".cyan(), view.name.bright_white().bold());
    if !view.description.is_empty() {
        println!("  {}", view.description.bright_black());
    }
    for (id, level) in &view.activities {
        activity_bar(&format!("Element {}", id), *level);
    }
    println!("  {:12} {}", "Point".white(), format_point(&view.point));
}

/// Display an activity slider as a bar
pub fn activity_bar(name: &str, level: f64) {
    let bar_width: usize = 30;
    let filled = ((level * bar_width as f64).round() as usize).min(bar_width);

    let color = if level > 0.75 {
        "bright_magenta"
    } else if level > 0.5 {
        "magenta"
    } else if level > 0.25 {
        "blue"
    } else {
        "bright_black"
    };

    let bar = format!(
        "[{}{}] {:.2}",
        "█".repeat(filled).color(color),
        "░".repeat(bar_width - filled).bright_black(),
        level
    );

    println!("  {:12} {}", name.white(), bar);
}

pub fn format_point(point: &QualiaPoint) -> String {
    let text = format!("({:.3}, {:.3})", point.x, point.y);
    if point.is_within_unit_square() {
        text.green().to_string()
    } else {
        text.yellow().to_string()
    }
}

/// Every complex, then the distance between the first two
pub fn views(views: &[ComplexView]) {
    for view in views {
        complex_card(view);
    }
    if let [a, b, ..] = views {
        println!();
        println!(
            "{} {} ↔ {}: {:.3}",
            "Separation".bright_black(),
            a.name,
            b.name,
            a.point.distance(&b.point)
        );
    }
    println!();
}

/// Print a plot grid with axes and legend
pub fn plot(grid: &PlotGrid) {
    println!();
    println!("{}", "═══ QUALIA SPACE ═══".cyan().bold());
    println!();
    let rows = grid.rows();
    for (i, row) in rows.iter().enumerate() {
        let label = if i == 0 {
            "1.0"
        } else if i == rows.len() - 1 {
            "0.0"
        } else {
            ""
        };
        let colored_row: String = row
            .chars()
            .map(|c| match c {
                '·' => c.to_string().bright_black().to_string(),
                '*' => c.to_string().red().bold().to_string(),
                _ => c.to_string().bright_white().bold().to_string(),
            })
            .collect();
        println!("{:>4} │{}", label.bright_black(), colored_row);
    }
    println!("     └{}", "─".repeat(grid.width));
    println!(
        "      {:<width$}{}",
        "0.0".bright_black(),
        "1.0".bright_black(),
        width = grid.width.saturating_sub(3)
    );
    println!();
    for marker in &grid.markers {
        let note = if marker.clipped {
            " (outside display range)".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {:12} {}{}",
            marker.symbol.to_string().bright_white().bold(),
            marker.label,
            format_point(&marker.point),
            note
        );
    }
    println!();
}

/// Echo an applied change
pub fn change(name: &str, change: &ActivityChange, point: &QualiaPoint) {
    println!(
        "{} {} element {}: {:.2} → {:.2}  {}",
        "✓".green(),
        name.bright_white(),
        change.element,
        change.previous,
        change.level,
        format_point(point)
    );
}

/// Display warning message
pub fn warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message.yellow());
}

/// Display error
pub fn error(message: &str) {
    println!();
    println!("{} {}", "ERROR:".red().bold(), message.red());
}

/// Display help
pub fn help() {
    println!();
    println!("{}", "═══ COMMANDS ═══".cyan().bold());
    println!();
    println!("  {}  Set one activity, e.g. 'chain 2 0.8'", "<complex> <element> <level>".green());
    println!("  {}     Show every complex", "/show".yellow());
    println!("  {}     Plot all points", "/plot".yellow());
    println!("  {}    Restore seeded activities", "/reset".yellow());
    println!("  {}     Show this help", "/help".yellow());
    println!("  {}     Exit", "/quit".yellow());
    println!();
}

/// Input prompt
pub fn prompt() -> String {
    format!("{} ", "qualia>".green().bold())
}
