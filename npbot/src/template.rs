//! Template-based message rendering.
//!
//! Messages are built from operator-configured templates containing bracketed
//! placeholders such as `[artist]`. The recognized placeholder names form a
//! closed set; rendering substitutes the values supplied for one invocation
//! and is otherwise pure.
//!
//! Two rules are held consistently:
//!
//! - a bracket token with no supplied value stays in the output literally,
//! - a supplied value whose name is outside the recognized set is skipped
//!   with a logged warning.

use std::collections::BTreeMap;

use tracing::warn;

/// The closed set of recognized placeholder names.
pub const PLACEHOLDERS: &[&str] = &["who", "title", "artist", "album", "addressee"];

/// The substitution values for one render operation.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: BTreeMap<String, String>,
}

impl Substitutions {
    /// Creates an empty set of substitutions.
    #[must_use]
    pub fn new() -> Substitutions {
        Substitutions::default()
    }

    /// Supplies a value for the placeholder `name`.
    ///
    /// Supplying a name outside [`PLACEHOLDERS`] is not an error here; it is
    /// reported and skipped when rendering.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

/// Renders `template` by replacing every occurrence of `[name]` for each
/// recognized placeholder with a supplied value.
#[must_use]
pub fn render(template: &str, substitutions: &Substitutions) -> String {
    let mut message = template.to_owned();

    for (name, value) in &substitutions.values {
        if !PLACEHOLDERS.contains(&name.as_str()) {
            warn!(%name, "ignoring substitution for unrecognized placeholder");
            continue;
        }

        message = message.replace(&format!("[{name}]"), value);
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now_playing_substitutions() -> Substitutions {
        let mut substitutions = Substitutions::new();
        substitutions.set("who", "/me");
        substitutions.set("artist", "Boards of Canada");
        substitutions.set("title", "Dayvan Cowboy");
        substitutions
    }

    #[test]
    fn replaces_every_recognized_token() {
        let rendered = render("[who] np: [artist] - [title]", &now_playing_substitutions());

        assert_eq!(rendered, "/me np: Boards of Canada - Dayvan Cowboy");
        assert!(!rendered.contains('['));
    }

    #[test]
    fn replaces_album_token_when_supplied() {
        let mut substitutions = now_playing_substitutions();
        substitutions.set("album", "The Campfire Headphase");

        let rendered = render(
            "[who] np: [artist] - [title] ([album])",
            &substitutions,
        );

        assert_eq!(
            rendered,
            "/me np: Boards of Canada - Dayvan Cowboy (The Campfire Headphase)"
        );
    }

    #[test]
    fn addresses_a_named_recipient() {
        let mut substitutions = Substitutions::new();
        substitutions.set("addressee", "bob");
        substitutions.set("artist", "Boards of Canada");
        substitutions.set("title", "Dayvan Cowboy");

        let rendered = render("[addressee]: I'm np: [artist] - [title]", &substitutions);

        assert_eq!(rendered, "bob: I'm np: Boards of Canada - Dayvan Cowboy");
    }

    #[test]
    fn unmatched_tokens_stay_literal() {
        let mut substitutions = Substitutions::new();
        substitutions.set("who", "/me");

        let rendered = render("[who] np: [artist] - [title]", &substitutions);

        assert_eq!(rendered, "/me np: [artist] - [title]");
    }

    #[test]
    fn unrecognized_names_are_never_substituted() {
        let mut substitutions = now_playing_substitutions();
        substitutions.set("hostname", "irc.example.com");

        let rendered = render("[who] np: [artist] - [title] on [hostname]", &substitutions);

        assert_eq!(
            rendered,
            "/me np: Boards of Canada - Dayvan Cowboy on [hostname]"
        );
    }

    #[test]
    fn repeated_tokens_are_all_replaced() {
        let mut substitutions = Substitutions::new();
        substitutions.set("who", "bob");

        assert_eq!(render("[who] [who] [who]", &substitutions), "bob bob bob");
    }

    #[test]
    fn rendering_is_deterministic() {
        let substitutions = now_playing_substitutions();
        let template = "[who] np: [artist] - [title]";

        assert_eq!(
            render(template, &substitutions),
            render(template, &substitutions)
        );
    }
}
