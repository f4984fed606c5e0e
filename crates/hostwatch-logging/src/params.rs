use std::path::{Path, PathBuf};

use crate::directions::Directions;

/// Mutable per-channel state: active sinks, file target, and the message
/// prefix in both its full Unicode and derived ASCII forms.
///
/// The filename and the `FILE` direction flag are deliberately independent:
/// clearing the path does not disable file printing, so a channel can be
/// file-enabled but currently pathless. Such writes no-op at the file sink.
#[derive(Clone, Debug)]
pub struct ChannelParams {
    directions: Directions,
    filename: PathBuf,
    prefix: String,
    prefix_ascii: String,
}

impl ChannelParams {
    pub fn new(directions: Directions, filename: impl Into<PathBuf>, prefix: &str) -> Self {
        let mut params = Self {
            directions,
            filename: filename.into(),
            prefix: String::new(),
            prefix_ascii: String::new(),
        };
        params.set_prefix(prefix);
        params
    }

    pub fn directions(&self) -> Directions {
        self.directions
    }

    pub fn set_directions(&mut self, directions: Directions) {
        self.directions = directions;
    }

    pub fn add_directions(&mut self, directions: Directions) {
        self.directions = self.directions.with(directions);
    }

    pub fn remove_directions(&mut self, directions: Directions) {
        self.directions = self.directions.without(directions);
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Sets the file target. An empty path means "no file target" and leaves
    /// the direction flags untouched.
    pub fn set_filename(&mut self, filename: impl Into<PathBuf>) {
        self.filename = filename.into();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// ASCII transliteration of the prefix; always in sync with
    /// [`prefix`](Self::prefix) because both forms are rewritten together.
    pub fn prefix_ascii(&self) -> &str {
        &self.prefix_ascii
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix_ascii = transliterate(prefix);
        self.prefix = prefix.to_owned();
    }
}

/// Lossy ASCII form: every non-ASCII scalar becomes `?`.
fn transliterate(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_forms_stay_in_sync() {
        let mut params = ChannelParams::new(Directions::NONE, "", "agent");
        assert_eq!(params.prefix(), "agent");
        assert_eq!(params.prefix_ascii(), "agent");

        params.set_prefix("münchen-agent");
        assert_eq!(params.prefix(), "münchen-agent");
        assert_eq!(params.prefix_ascii(), "m?nchen-agent");
    }

    #[test]
    fn empty_filename_keeps_flags() {
        let mut params = ChannelParams::new(
            Directions::DEBUGGER | Directions::FILE,
            "host.log",
            "agent",
        );
        params.set_filename("");
        assert!(params.filename().as_os_str().is_empty());
        assert!(params.directions().contains(Directions::FILE));
        assert!(params.directions().contains(Directions::DEBUGGER));
    }

    #[test]
    fn direction_edits_are_idempotent() {
        let mut params = ChannelParams::new(Directions::DEBUGGER, "", "agent");
        params.add_directions(Directions::FILE);
        params.add_directions(Directions::FILE);
        assert_eq!(params.directions(), Directions::DEBUGGER | Directions::FILE);

        params.remove_directions(Directions::FILE);
        params.remove_directions(Directions::FILE);
        assert_eq!(params.directions(), Directions::DEBUGGER);
    }
}
