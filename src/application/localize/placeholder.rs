//! Keeps game variables away from the translation engine.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `[Root.GetName]`, `$VALUE$` and `#bold` style tokens.
static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[.*?\]|\$[^$]+?\$|#\w+").expect("variable regex should compile")
});

/// Text with its variables swapped for numbered `[VAR_n]` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedText {
    pub text: String,
    variables: Vec<String>,
}

impl ProtectedText {
    pub fn protect(text: &str) -> Self {
        let mut variables = Vec::new();
        let protected = VARIABLE_PATTERN.replace_all(text, |caps: &Captures| {
            let marker = format!("[VAR_{}]", variables.len());
            variables.push(caps[0].to_string());
            marker
        });

        Self {
            text: protected.into_owned(),
            variables,
        }
    }

    /// Put the original variables back into `translated`. Markers the engine
    /// dropped are simply lost.
    pub fn restore(&self, translated: &str) -> String {
        let mut restored = translated.to_string();
        for (i, variable) in self.variables.iter().enumerate() {
            restored = restored.replace(&format!("[VAR_{}]", i), variable);
        }
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_all_variable_kinds() {
        let protected = ProtectedText::protect("Hello [Root.GetName], you have $GOLD$ #bold coins#!");

        assert_eq!(
            protected.text,
            "Hello [VAR_0], you have [VAR_1] [VAR_2] coins#!"
        );
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let protected = ProtectedText::protect("Declare war");
        assert_eq!(protected.text, "Declare war");
        assert_eq!(protected.restore("Declarar la guerra"), "Declarar la guerra");
    }

    #[test]
    fn test_restore_after_reordering() {
        let protected = ProtectedText::protect("$COUNTRY$ declares war on [target.GetName]");

        let restored = protected.restore("[VAR_1] recibe la declaración de guerra de [VAR_0]");
        assert_eq!(
            restored,
            "[target.GetName] recibe la declaración de guerra de $COUNTRY$"
        );
    }

    #[test]
    fn test_restore_many_markers_does_not_confuse_prefixes() {
        let text: String = (0..12).map(|i| format!("$V{}$ ", i)).collect();
        let protected = ProtectedText::protect(&text);

        assert_eq!(protected.restore(&protected.text), text);
    }

    #[test]
    fn test_lone_dollar_is_not_a_variable() {
        let protected = ProtectedText::protect("Costs 5$ per month");
        assert_eq!(protected.text, "Costs 5$ per month");
    }
}
