#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Model,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub speaker: Speaker,
    pub text: String,
}

// Append-only record of the session. Entries are never edited, removed or
// reordered once pushed.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(Entry {
            speaker,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}
