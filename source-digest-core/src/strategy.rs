//! Per-language line filtering.
//!
//! A [`ContentStrategy`] is two predicates picked by a [`Language`]: one that
//! recognises comment lines and one that recognises language directives
//! (imports, packages, library declarations). Both work on a single physical
//! line. Block comments that span several lines are not recognised, so the
//! interior of a multi-line `/** ... */` is emitted as ordinary content.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::path_display::normalized_path;

static DOC_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\*\*.*\*/\s*$").unwrap());
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*//.*$").unwrap());
static TRIPLE_SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*///.*$").unwrap());
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\*.*\*/\s*$").unwrap());
static HASH_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#.*$").unwrap());
static KOTLIN_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(import|package)\s+.*$").unwrap());

const DART_DIRECTIVES: [&str; 4] = ["import ", "export ", "part ", "library "];

/// Languages with a registered strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Java,
    TypeScript,
    Kotlin,
    Dart,
    Properties,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Java,
        Language::TypeScript,
        Language::Kotlin,
        Language::Dart,
        Language::Properties,
    ];

    /// Canonical file-type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::TypeScript => "typescript",
            Language::Kotlin => "kotlin",
            Language::Dart => "dart",
            Language::Properties => "properties",
        }
    }

    /// Case-insensitive lookup by tag or alias.
    pub fn from_tag(tag: &str) -> Option<Language> {
        match tag.trim().to_lowercase().as_str() {
            "java" => Some(Language::Java),
            "typescript" | "ts" => Some(Language::TypeScript),
            "kotlin" | "kt" => Some(Language::Kotlin),
            "dart" => Some(Language::Dart),
            "properties" | "props" => Some(Language::Properties),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn c_style_comment(line: &str) -> bool {
    DOC_BLOCK.is_match(line) || LINE_COMMENT.is_match(line)
}

fn dart_comment(line: &str) -> bool {
    TRIPLE_SLASH.is_match(line)
        || DOC_BLOCK.is_match(line)
        || LINE_COMMENT.is_match(line)
        || BLOCK_COMMENT.is_match(line)
}

fn hash_comment(line: &str) -> bool {
    HASH_COMMENT.is_match(line)
}

// `import`/`package` with no word boundary: `packageName = 1;` is dropped too.
fn java_directive(trimmed: &str) -> bool {
    trimmed.starts_with("import") || trimmed.starts_with("package")
}

fn kotlin_directive(trimmed: &str) -> bool {
    KOTLIN_DIRECTIVE.is_match(trimmed)
}

fn dart_directive(trimmed: &str) -> bool {
    DART_DIRECTIVES.iter().any(|d| trimmed.starts_with(d))
}

fn no_directive(_trimmed: &str) -> bool {
    false
}

/// Line filter for one language.
#[derive(Clone, Copy)]
pub struct ContentStrategy {
    language: Language,
    is_comment: fn(&str) -> bool,
    is_directive: fn(&str) -> bool,
}

impl fmt::Debug for ContentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStrategy")
            .field("language", &self.language)
            .finish()
    }
}

impl ContentStrategy {
    pub fn for_language(language: Language) -> Self {
        let (is_comment, is_directive): (fn(&str) -> bool, fn(&str) -> bool) = match language {
            Language::Java => (c_style_comment, java_directive),
            Language::TypeScript => (c_style_comment, no_directive),
            Language::Kotlin => (c_style_comment, kotlin_directive),
            Language::Dart => (dart_comment, dart_directive),
            Language::Properties => (hash_comment, no_directive),
        };
        Self {
            language,
            is_comment,
            is_directive,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Whole-line comment test on the untrimmed line.
    pub fn is_comment_line(&self, line: &str) -> bool {
        (self.is_comment)(line)
    }

    /// Import/package/library declaration test on the trimmed line.
    pub fn is_directive_line(&self, line: &str) -> bool {
        (self.is_directive)(line.trim())
    }

    pub fn should_skip(&self, line: &str) -> bool {
        line.trim().is_empty() || self.is_comment_line(line) || self.is_directive_line(line)
    }

    /// Header line followed by every line that survives filtering.
    ///
    /// An empty input produces an empty output; any other input produces at
    /// least the header, even when every line is dropped.
    pub fn process_lines<I>(&self, file: &Path, lines: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut lines = lines.into_iter().peekable();
        if lines.peek().is_none() {
            return Vec::new();
        }

        let mut out = vec![format!("// {}", normalized_path(file))];
        out.extend(
            lines
                .filter(|line| !self.should_skip(line.as_ref()))
                .map(|line| line.as_ref().to_string()),
        );
        out
    }
}

/// Maps file-type tags to strategies.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrategyRegistry;

impl StrategyRegistry {
    pub fn new() -> Self {
        Self
    }

    /// `None` for tags with no registered language; callers skip the profile.
    pub fn create_strategy(&self, tag: &str) -> Option<ContentStrategy> {
        Language::from_tag(tag).map(ContentStrategy::for_language)
    }

    pub fn supported_tags(&self) -> Vec<&'static str> {
        Language::ALL.iter().map(Language::tag).collect()
    }
}
