//! In-memory form of a parsed rule file.

/// The words following the media type on a rule line: a program name and its
/// fixed arguments, in file order.
///
/// An empty template is legal and means "do nothing and succeed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTemplate {
    words: Vec<String>,
}

impl CommandTemplate {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The program to run, if any.
    pub fn program(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }

    /// Fixed arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.words.get(1..).unwrap_or_default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl<S: Into<String>> FromIterator<S> for CommandTemplate {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// One line of the rule file: files of `media_type` are handled by `command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub media_type: String,
    pub command: CommandTemplate,
}

impl Rule {
    pub fn new(media_type: impl Into<String>, command: CommandTemplate) -> Self {
        Self {
            media_type: media_type.into(),
            command,
        }
    }

    /// Exact, byte-for-byte comparison against a classified media type.
    pub fn matches(&self, media_type: &str) -> bool {
        self.media_type == media_type
    }
}

/// Rules in the order they appear in the rule file.
///
/// The table is never reordered or deduplicated: when several rules name the
/// same media type, the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
