use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of language filters the filter bar offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    All,
    JavaScript,
    Ruby,
    Java,
    Css,
    Python,
}

impl Language {
    /// Every filter, in the order the filter bar shows them.
    pub const ALL: [Language; 6] = [
        Language::All,
        Language::JavaScript,
        Language::Ruby,
        Language::Java,
        Language::Css,
        Language::Python,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::All => "All",
            Language::JavaScript => "JavaScript",
            Language::Ruby => "Ruby",
            Language::Java => "Java",
            Language::Css => "CSS",
            Language::Python => "Python",
        }
    }

    /// GitHub search qualifier for this filter; `All` has none.
    pub fn query_term(self) -> Option<&'static str> {
        match self {
            Language::All => None,
            Language::JavaScript => Some("javascript"),
            Language::Ruby => Some("ruby"),
            Language::Java => Some("java"),
            Language::Css => Some("css"),
            Language::Python => Some("python"),
        }
    }

    /// Stable slot index; the result cache keys its slots by this.
    pub(crate) fn index(self) -> usize {
        match self {
            Language::All => 0,
            Language::JavaScript => 1,
            Language::Ruby => 2,
            Language::Java => 3,
            Language::Css => 4,
            Language::Python => 5,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Language::All),
            "javascript" | "js" => Ok(Language::JavaScript),
            "ruby" => Ok(Language::Ruby),
            "java" => Ok(Language::Java),
            "css" => Ok(Language::Css),
            "python" => Ok(Language::Python),
            other => Err(crate::Error::ConfigError(format!(
                "unknown language filter: {}",
                other
            ))),
        }
    }
}
