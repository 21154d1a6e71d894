use crate::errors::{FactoryError, Result};

/// A named prompt pair steering one run. The store is static and read-only;
/// the user prompt is a prefix that section instructions get appended to.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub user_prompt: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        name: "How to start a business",
        system_prompt: "We are creating an article on how to start a business",
        user_prompt: "Please generate a step-by-step guide on starting a business",
    },
    Template {
        name: "Learn Python",
        system_prompt: "We are creating an article on learning Python",
        user_prompt: "Please generate a detailed guide on how to learn Python for beginners",
    },
    Template {
        name: "Healthy living",
        system_prompt: "We are creating an article on healthy living",
        user_prompt: "Please generate a guide on how to maintain a healthy lifestyle",
    },
];

pub fn names() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.name).collect()
}

pub fn lookup(name: &str) -> Result<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| {
            FactoryError::Template(format!("{name} (known: {})", names().join(", ")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_known_template() {
        let t = lookup("Learn Python").unwrap();
        assert!(t.system_prompt.contains("learning Python"));
    }

    #[test]
    fn lookup_rejects_unknown_template() {
        let err = lookup("no such template").unwrap_err();
        assert!(matches!(err, FactoryError::Template(_)));
        assert!(err.to_string().contains("Healthy living"));
    }
}
