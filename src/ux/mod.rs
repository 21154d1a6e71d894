use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// User-facing status surface: colored stage messages and the end-of-run
/// dashboard.

pub fn status_ok(msg: &str) {
    println!("{} {}", "ok:".green().bold(), msg);
}

pub fn status_err(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn list_templates(names: &[&str]) {
    println!("\n=== TEMPLATES ===");
    for (i, name) in names.iter().enumerate() {
        println!("{}. {}", i + 1, name);
    }
    println!();
}

pub fn section_progress(total_sections: u64, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_sections == 0 {
        return None;
    }
    let pb = ProgressBar::new(total_sections);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} sections {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    Some(pb)
}

pub struct RunSummary {
    pub generated: usize,
    pub sections: usize,
    pub failed: Vec<(String, String)>,
    pub output: Option<String>,
    pub html_dir: Option<String>,
}

pub fn print_run_dashboard(summary: &RunSummary) {
    println!("\n=== RUN SUMMARY ===");
    println!(
        "{} {}   {} {}   {} {}",
        "[GENERATED]".green().bold(),
        summary.generated,
        "[SECTIONS]".cyan().bold(),
        summary.sections,
        "[FAILED]".red().bold(),
        summary.failed.len(),
    );
    for (keyword, cause) in &summary.failed {
        println!(" - {} {}", keyword.red(), cause);
    }
    if let Some(out) = &summary.output {
        println!("output: {out}");
    }
    if let Some(dir) = &summary.html_dir {
        println!("html: {dir}");
    }
    println!();
}
