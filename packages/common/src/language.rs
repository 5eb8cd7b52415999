use std::fmt;

use serde::{Deserialize, Serialize};

/// A language a submission can be written in.
///
/// Clients refer to languages by a platform id; the execution engine uses its own ids,
/// and each problem ships one execution template per language, keyed by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Cpp,
}

impl Language {
    pub const ALL: &'static [Language] = &[Self::Python, Self::JavaScript, Self::Cpp];

    /// Look up a language by the id clients submit with.
    pub fn from_platform_id(id: i32) -> Option<Self> {
        Self::ALL.iter().find(|l| l.platform_id() == id).copied()
    }

    pub fn platform_id(&self) -> i32 {
        match self {
            Self::Python => 1,
            Self::JavaScript => 2,
            Self::Cpp => 3,
        }
    }

    /// Language id understood by the execution engine (Judge0 numbering).
    pub fn engine_id(&self) -> i32 {
        match self {
            Self::Python => 71,
            Self::JavaScript => 63,
            Self::Cpp => 54,
        }
    }

    /// Extension of the problem's execution template for this language.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::JavaScript => "js",
            Self::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Cpp => "cpp",
        };
        f.write_str(name)
    }
}
