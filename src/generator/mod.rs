use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{FactoryError, Result};
use crate::log::RunLog;
use crate::parser::Article;
use crate::provider::DynProvider;
use crate::templates::Template;
use crate::wire::{ChatMessage, ChatRequest};

/// The rolling message history sent to the model while one article is being
/// generated, so later sections keep the terminology and tone of earlier
/// ones. Owned by one `generate` call and dropped when it returns.
/// Invariant: length = 1 system message + 2 messages per section processed.
pub struct ConversationMemory {
    messages: Vec<ChatMessage>,
}

impl ConversationMemory {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self { messages: vec![ChatMessage::system(system_prompt)] }
    }

    /// Full history plus a new trailing user message, for the next request.
    pub fn with_user(&self, prompt: &str) -> Vec<ChatMessage> {
        let mut messages = self.messages.clone();
        messages.push(ChatMessage::user(prompt));
        messages
    }

    pub fn record(&mut self, prompt: String, reply: String) {
        self.messages.push(ChatMessage::user(prompt));
        self.messages.push(ChatMessage::assistant(reply));
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSection {
    pub section: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub keyword: String,
    pub sections: Vec<GeneratedSection>,
}

/// Drives the sequential, causally chained calls for one article at a time.
pub struct Generator<'a> {
    provider: &'a DynProvider,
    cfg: &'a Config,
    template: &'a Template,
    runlog: &'a RunLog,
    debug: bool,
    progress: Option<ProgressBar>,
}

impl<'a> Generator<'a> {
    pub fn new(
        provider: &'a DynProvider,
        cfg: &'a Config,
        template: &'a Template,
        runlog: &'a RunLog,
        debug: bool,
        progress: Option<ProgressBar>,
    ) -> Self {
        Self { provider, cfg, template, runlog, debug, progress }
    }

    /// One request per section, strictly in section order, each seeing the
    /// full prior history. A failed call aborts this article; nothing
    /// partial is returned.
    pub async fn generate(&self, article: &Article) -> Result<GeneratedArticle> {
        let mut memory = ConversationMemory::new(self.template.system_prompt);
        let mut sections = Vec::with_capacity(article.sections.len());

        for section in &article.sections {
            let prompt = format!("{} {}", self.template.user_prompt, section.instructions);
            let req = ChatRequest {
                model: self.cfg.model.clone(),
                max_tokens: self.cfg.max_tokens,
                top_p: self.cfg.top_p,
                frequency_penalty: self.cfg.frequency_penalty,
                presence_penalty: self.cfg.presence_penalty,
                messages: memory.with_user(&prompt),
            };

            let reply = self.provider.complete(&req, self.debug).await.map_err(|e| {
                let cause = match e {
                    FactoryError::Generation(msg) => msg,
                    other => other.to_string(),
                };
                FactoryError::Generation(format!(
                    "article `{}`, section `{}`: {cause}",
                    article.keyword, section.name
                ))
            })?;

            self.runlog.save_exchange(&article.keyword, &section.name, &req, &reply)?;
            memory.record(prompt, reply.clone());
            sections.push(GeneratedSection { section: section.name.clone(), content: reply });
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        Ok(GeneratedArticle { keyword: article.keyword.clone(), sections })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Section;
    use crate::provider::ChatProvider;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted provider: replies "T-<n>" on the n-th call and records every
    /// request it sees.
    struct MockProvider {
        calls: Mutex<Vec<ChatRequest>>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self { calls: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl ChatProvider for MockProvider {
        async fn complete(&self, req: &ChatRequest, _debug: bool) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(req.clone());
            Ok(format!("T-{}", calls.len()))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl ChatProvider for FailingProvider {
        async fn complete(&self, _req: &ChatRequest, _debug: bool) -> Result<String> {
            Err(FactoryError::Generation("quota exceeded".into()))
        }
    }

    fn article(n_sections: usize) -> Article {
        Article {
            keyword: "k".into(),
            topic: "t".into(),
            sections: (1..=n_sections)
                .map(|i| Section { name: format!("s{i}"), instructions: format!("do {i}") })
                .collect(),
        }
    }

    fn template() -> Template {
        Template { name: "test", system_prompt: "sys", user_prompt: "write:" }
    }

    #[tokio::test]
    async fn three_sections_three_ordered_calls() {
        let provider: DynProvider = Box::new(MockProvider::new());
        let cfg = Config::default();
        let template = template();
        let runlog = RunLog::disabled();
        let gen = Generator::new(&provider, &cfg, &template, &runlog, false, None);

        let out = gen.generate(&article(3)).await.unwrap();
        assert_eq!(out.keyword, "k");
        assert_eq!(out.sections.len(), 3);
        for (i, s) in out.sections.iter().enumerate() {
            assert_eq!(s.section, format!("s{}", i + 1));
            assert_eq!(s.content, format!("T-{}", i + 1));
        }
    }

    #[tokio::test]
    async fn third_call_sees_system_plus_two_prior_pairs() {
        let provider_impl = std::sync::Arc::new(MockProvider::new());

        struct Shared(std::sync::Arc<MockProvider>);
        #[async_trait]
        impl ChatProvider for Shared {
            async fn complete(&self, req: &ChatRequest, debug: bool) -> Result<String> {
                self.0.complete(req, debug).await
            }
        }

        let provider: DynProvider = Box::new(Shared(provider_impl.clone()));
        let cfg = Config::default();
        let template = template();
        let runlog = RunLog::disabled();
        let gen = Generator::new(&provider, &cfg, &template, &runlog, false, None);
        gen.generate(&article(3)).await.unwrap();

        let calls = provider_impl.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        // 1 system + (user, assistant) x 2 + the new user message.
        assert_eq!(calls[2].messages.len(), 6);
        let third = &calls[2];
        assert_eq!(third.messages[0].content, "sys");
        assert_eq!(third.messages[1].content, "write: do 1");
        assert_eq!(third.messages[2].content, "T-1");
        assert_eq!(third.messages[3].content, "write: do 2");
        assert_eq!(third.messages[4].content, "T-2");
        assert_eq!(third.messages[5].content, "write: do 3");
    }

    #[tokio::test]
    async fn failure_aborts_the_article_with_context() {
        let provider: DynProvider = Box::new(FailingProvider);
        let cfg = Config::default();
        let template = template();
        let runlog = RunLog::disabled();
        let gen = Generator::new(&provider, &cfg, &template, &runlog, false, None);

        let err = gen.generate(&article(2)).await.unwrap_err();
        assert!(matches!(err, FactoryError::Generation(_)));
        let msg = err.to_string();
        assert!(msg.contains("article `k`"));
        assert!(msg.contains("section `s1`"));
        assert!(msg.contains("quota exceeded"));
    }

    #[test]
    fn memory_invariant_holds() {
        let mut memory = ConversationMemory::new("sys");
        assert_eq!(memory.len(), 1);
        memory.record("u1".into(), "a1".into());
        memory.record("u2".into(), "a2".into());
        assert_eq!(memory.len(), 1 + 2 * 2);
        // The request history for the 3rd section: full log + new user msg.
        assert_eq!(memory.with_user("u3").len(), 6);
        assert!(!memory.is_empty());
    }
}
