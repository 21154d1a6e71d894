use crate::errors::{FactoryError, Result};
use crate::loader::Table;

/// One named subdivision of an article and the instruction used to generate
/// its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub instructions: String,
}

/// An article request parsed from one input row. Sections keep the input
/// column order; immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub keyword: String,
    pub topic: String,
    pub sections: Vec<Section>,
}

/// Turn the loaded table into articles. The first two columns must be
/// `keyword` and `topic`; every later column is a section whose cell holds
/// the generation instruction. An empty cell means the section is skipped
/// for that row, not generated with an empty instruction. Duplicate keywords
/// are last-write-wins: the later row replaces the earlier article in place.
pub fn parse(table: &Table) -> Result<Vec<Article>> {
    for (idx, required) in ["keyword", "topic"].iter().enumerate() {
        match table.headers.get(idx) {
            Some(h) if h == required => {}
            other => {
                return Err(FactoryError::Parse(format!(
                    "column {idx} must be `{required}`, found {:?}",
                    other.map(String::as_str)
                )))
            }
        }
    }

    let mut articles: Vec<Article> = Vec::new();
    for row in &table.rows {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        let keyword = cell(0).to_string();
        let topic = cell(1).to_string();

        let sections = table.headers[2..]
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let instructions = cell(i + 2).trim();
                if instructions.is_empty() {
                    None
                } else {
                    Some(Section { name: name.clone(), instructions: instructions.to_string() })
                }
            })
            .collect();

        let article = Article { keyword, topic, sections };
        match articles.iter().position(|a| a.keyword == article.keyword) {
            Some(i) => articles[i] = article,
            None => articles.push(article),
        }
    }

    Ok(articles)
}
