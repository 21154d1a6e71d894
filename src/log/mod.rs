use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::{FactoryError, Result};
use crate::html::slug;
use crate::wire::ChatRequest;

/// Opt-in capture of every chat exchange under `<artifact_root>/runs/<id>/`,
/// one request/response JSON pair per article section.
pub struct RunLog {
    run: Uuid,
    dir: PathBuf,
    save_request: bool,
    save_response: bool,
}

#[derive(Serialize)]
struct ResponseArtifact<'a> {
    generated_at: DateTime<Utc>,
    content: &'a str,
}

impl RunLog {
    pub fn new(artifact_root: &str, save_request: bool, save_response: bool) -> Self {
        let run = Uuid::new_v4();
        let dir = Path::new(artifact_root).join("runs").join(run.to_string());
        Self { run, dir, save_request, save_response }
    }

    /// Captures nothing; used when neither save flag is set.
    pub fn disabled() -> Self {
        let run = Uuid::new_v4();
        Self { run, dir: PathBuf::new(), save_request: false, save_response: false }
    }

    pub fn run_id(&self) -> Uuid {
        self.run
    }

    pub fn save_exchange(
        &self,
        keyword: &str,
        section: &str,
        req: &ChatRequest,
        reply: &str,
    ) -> Result<()> {
        if !self.save_request && !self.save_response {
            return Ok(());
        }

        fs::create_dir_all(&self.dir)
            .map_err(|e| FactoryError::Write(format!("{}: {e}", self.dir.display())))?;
        let stem = format!("{}.{}", slug(keyword), slug(section));

        if self.save_request {
            let p = self.dir.join(format!("{stem}.request.json"));
            let body = serde_json::to_string_pretty(req)
                .map_err(|e| FactoryError::Write(e.to_string()))?;
            fs::write(&p, body).map_err(|e| FactoryError::Write(format!("{}: {e}", p.display())))?;
        }

        if self.save_response {
            let p = self.dir.join(format!("{stem}.response.json"));
            let artifact = ResponseArtifact { generated_at: Utc::now(), content: reply };
            let body = serde_json::to_string_pretty(&artifact)
                .map_err(|e| FactoryError::Write(e.to_string()))?;
            fs::write(&p, body).map_err(|e| FactoryError::Write(format!("{}: {e}", p.display())))?;
        }

        Ok(())
    }

    pub fn print_planned_paths(&self) {
        if !self.save_request && !self.save_response {
            println!("debug: exchange capture disabled (no save flags)");
            return;
        }
        println!("debug: run id: {}", self.run);
        println!("debug: artifacts directory: {}", self.dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ChatMessage;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "m".into(),
            max_tokens: 10,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
        }
    }

    #[test]
    fn saves_request_and_response_pair() {
        let root = tempfile::tempdir().unwrap();
        let log = RunLog::new(root.path().to_str().unwrap(), true, true);
        log.save_exchange("My Keyword", "Intro", &request(), "hello").unwrap();

        let dir = root.path().join("runs").join(log.run_id().to_string());
        let req = fs::read_to_string(dir.join("my-keyword.intro.request.json")).unwrap();
        assert!(req.contains("\"model\": \"m\""));
        let resp = fs::read_to_string(dir.join("my-keyword.intro.response.json")).unwrap();
        assert!(resp.contains("\"content\": \"hello\""));
    }

    #[test]
    fn disabled_log_touches_nothing() {
        let log = RunLog::disabled();
        log.save_exchange("k", "s", &request(), "hello").unwrap();
    }
}
