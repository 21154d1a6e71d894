use crate::errors::{FactoryError, Result};
use crate::generator::GeneratedArticle;

/// Render one generated article as a flat HTML fragment: an `<h1>` for the
/// keyword, then `<h2>`/`<p>` per section in generation order. Pure; the
/// only failure is a malformed article with no keyword.
pub fn assemble(article: &GeneratedArticle) -> Result<String> {
    if article.keyword.trim().is_empty() {
        return Err(FactoryError::Render("article has no keyword".into()));
    }

    let mut html = format!("<h1>{}</h1>\n", article.keyword);
    for section in &article.sections {
        html.push_str(&format!("<h2>{}</h2>\n<p>{}</p>\n", section.section, section.content));
    }
    Ok(html)
}

/// Filesystem-safe name for per-article exports and run artifacts.
pub fn slug(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    let mut last_dash = true;
    for c in keyword.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("article");
    }
    out
}
