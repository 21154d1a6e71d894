use anyhow::{bail, Context};
use clap::Parser;

mod cli;
mod config;
mod errors;
mod generator;
mod html;
mod loader;
mod log;
mod parser;
mod provider;
mod templates;
mod ux;
mod wire;
mod writer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    if args.list_templates {
        ux::list_templates(&templates::names());
        return Ok(());
    }

    let mut cfg = match &args.config {
        Some(path) => config::Config::from_file(path)?,
        None => config::Config::default(),
    };
    if let Some(model) = args.model.clone() {
        cfg.model = model;
    }
    if let Some(timeout) = args.timeout_secs {
        cfg.timeout_secs = timeout;
    }
    if let Some(output) = args.output.clone() {
        cfg.output_file = output;
    }

    let input = match &args.input {
        Some(p) => p.clone(),
        None => bail!("--input is required (or use --list-templates)"),
    };
    let template_name = match &args.template {
        Some(t) => t.clone(),
        None => bail!("--template is required; see --list-templates"),
    };
    let template = templates::lookup(&template_name)?;

    // ===== LOAD & PARSE =====
    let table = match loader::load_path(&input) {
        Ok(t) => {
            ux::status_ok(&format!("data loaded from {input} ({} rows)", t.rows.len()));
            t
        }
        Err(e) => {
            ux::status_err(&e.to_string());
            return Err(e.into());
        }
    };
    let articles = parser::parse(&table)?;
    ux::status_ok(&format!("parsed {} article(s)", articles.len()));

    // ===== GENERATE =====
    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY env var is not set")?;
    let provider = provider::make_provider(args.provider.clone(), api_key, cfg.timeout_secs);

    let runlog = if args.save_request || args.save_response {
        log::RunLog::new(&cfg.artifact_root, args.save_request, args.save_response)
    } else {
        log::RunLog::disabled()
    };
    if args.debug {
        runlog.print_planned_paths();
    }

    let total_sections: u64 = articles.iter().map(|a| a.sections.len() as u64).sum();
    let progress = ux::section_progress(total_sections, args.progress);

    let gen = generator::Generator::new(
        &provider,
        &cfg,
        template,
        &runlog,
        args.debug,
        progress.clone(),
    );

    // A failed article is skipped, not fatal: remaining articles still
    // generate, and every failure is reported in the summary.
    let mut generated = Vec::new();
    let mut failed: Vec<(String, String)> = Vec::new();
    for article in &articles {
        match gen.generate(article).await {
            Ok(out) => generated.push(out),
            Err(e) => {
                ux::status_err(&e.to_string());
                failed.push((article.keyword.clone(), e.to_string()));
            }
        }
    }
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    // ===== EXPORT =====
    let mut html_dir = None;
    if let Some(dir) = &args.html_dir {
        fs_err::create_dir_all(dir)?;
        for article in &generated {
            let page = html::assemble(article)?;
            let path = std::path::Path::new(dir).join(format!("{}.html", html::slug(&article.keyword)));
            fs_err::write(&path, page)?;
        }
        html_dir = Some(dir.clone());
    }

    writer::write(&generated, &cfg.output_file)?;
    ux::status_ok(&format!("articles saved to {}", cfg.output_file));

    let sections: usize = generated.iter().map(|a| a.sections.len()).sum();
    ux::print_run_dashboard(&ux::RunSummary {
        generated: generated.len(),
        sections,
        failed,
        output: Some(cfg.output_file.clone()),
        html_dir,
    });

    if generated.is_empty() && !articles.is_empty() {
        bail!("generation failed for every article");
    }
    Ok(())
}
