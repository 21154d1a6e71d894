use std::path::Path;

use crate::errors::{FactoryError, Result};
use crate::generator::{GeneratedArticle, GeneratedSection};

/// Serialize the run's articles to a two-column CSV: `keyword`, plus the
/// ordered sections as a JSON array so the mapping round-trips losslessly.
/// The write is atomic: a temp file in the destination directory is renamed
/// over the final name, so a failure never leaves a partial file behind.
pub fn write(articles: &[GeneratedArticle], path: &str) -> Result<()> {
    let dest = Path::new(path);
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| FactoryError::Write(format!("creating temp file in {}: {e}", dir.display())))?;

    {
        let mut wtr = csv::Writer::from_writer(tmp.as_file());
        wtr.write_record(["keyword", "sections"])
            .map_err(|e| FactoryError::Write(e.to_string()))?;
        for article in articles {
            let sections = serde_json::to_string(&article.sections)
                .map_err(|e| FactoryError::Write(e.to_string()))?;
            wtr.write_record([article.keyword.as_str(), sections.as_str()])
                .map_err(|e| FactoryError::Write(e.to_string()))?;
        }
        wtr.flush().map_err(|e| FactoryError::Write(e.to_string()))?;
    }

    tmp.persist(dest)
        .map_err(|e| FactoryError::Write(format!("{}: {e}", dest.display())))?;
    Ok(())
}

/// Read a file produced by [`write`] back into articles, for downstream
/// consumers of the output table.
pub fn read(path: &str) -> Result<Vec<GeneratedArticle>> {
    let table = crate::loader::load_path(path)?;
    let keyword_col = table
        .column_index("keyword")
        .ok_or_else(|| FactoryError::Parse("output file is missing `keyword` column".into()))?;
    let sections_col = table
        .column_index("sections")
        .ok_or_else(|| FactoryError::Parse("output file is missing `sections` column".into()))?;

    table
        .rows
        .iter()
        .map(|row| {
            let keyword = row.get(keyword_col).cloned().unwrap_or_default();
            let raw = row.get(sections_col).map(String::as_str).unwrap_or("[]");
            let sections: Vec<GeneratedSection> = serde_json::from_str(raw)
                .map_err(|e| FactoryError::Parse(format!("article `{keyword}`: {e}")))?;
            Ok(GeneratedArticle { keyword, sections })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;

    fn articles() -> Vec<GeneratedArticle> {
        vec![
            GeneratedArticle {
                keyword: "alpha".into(),
                sections: vec![
                    GeneratedSection { section: "Intro".into(), content: "Hello".into() },
                    GeneratedSection { section: "Body, with commas".into(), content: "a\nb".into() },
                ],
            },
            GeneratedArticle { keyword: "beta".into(), sections: vec![] },
        ]
    }

    #[test]
    fn keywords_round_trip_through_the_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let path = path.to_str().unwrap();

        write(&articles(), path).unwrap();

        let table = loader::load_path(path).unwrap();
        let col = table.column_index("keyword").unwrap();
        let keywords: Vec<&str> = table.rows.iter().map(|r| r[col].as_str()).collect();
        assert_eq!(keywords, vec!["alpha", "beta"]);
    }

    #[test]
    fn sections_round_trip_losslessly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let path = path.to_str().unwrap();

        let original = articles();
        write(&original, path).unwrap();
        assert_eq!(read(path).unwrap(), original);
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let err = write(&articles(), "/nonexistent-dir/out.csv").unwrap_err();
        assert!(matches!(err, FactoryError::Write(_)));
    }
}
