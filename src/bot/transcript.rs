use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
    /// Notes from the chat itself (resets, errors).
    System,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "you",
            Speaker::Bot => "bot",
            Speaker::System => "--",
        }
    }
}

/// A single line in the transcript.
#[derive(Debug, Clone)]
pub struct Line {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Line {
    fn new(speaker: Speaker, content: &str) -> Self {
        Self {
            speaker,
            content: content.to_string(),
            timestamp: Local::now(),
        }
    }

    /// `[HH:MM:SS] who: text`
    pub fn render(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.speaker.label(),
            self.content
        )
    }
}

/// In-memory chat transcript for the interactive session.
/// Keeps a rolling window; nothing is written to disk.
#[derive(Debug)]
pub struct Transcript {
    lines: VecDeque<Line>,
    max_history: usize,
}

impl Transcript {
    pub fn new(max_history: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_history,
        }
    }

    pub fn add_user(&mut self, content: &str) {
        self.push(Line::new(Speaker::User, content));
    }

    pub fn add_bot(&mut self, content: &str) {
        self.push(Line::new(Speaker::Bot, content));
    }

    pub fn add_system(&mut self, content: &str) {
        self.push(Line::new(Speaker::System, content));
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn push(&mut self, line: Line) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_history {
            self.lines.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(t: &Transcript) -> Vec<&str> {
        t.lines().map(|l| l.content.as_str()).collect()
    }

    // ── Basics ────────────────────────────────────────────────────

    #[test]
    fn new_transcript_empty() {
        let t = Transcript::new(10);
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn add_lines_records_speaker() {
        let mut t = Transcript::new(10);
        t.add_user("hello");
        t.add_bot("hi there");
        t.add_system("new conversation");
        let speakers: Vec<Speaker> = t.lines().map(|l| l.speaker).collect();
        assert_eq!(speakers, vec![Speaker::User, Speaker::Bot, Speaker::System]);
        assert_eq!(contents(&t), vec!["hello", "hi there", "new conversation"]);
    }

    #[test]
    fn clear_empties_transcript() {
        let mut t = Transcript::new(10);
        t.add_user("1");
        t.add_bot("2");
        t.clear();
        assert!(t.is_empty());
    }

    // ── Trimming ──────────────────────────────────────────────────

    #[test]
    fn trims_to_max_history() {
        let mut t = Transcript::new(3);
        t.add_user("1");
        t.add_bot("2");
        t.add_user("3");
        t.add_bot("4");
        assert_eq!(t.len(), 3);
        assert_eq!(contents(&t), vec!["2", "3", "4"]);
    }

    #[test]
    fn max_history_of_one_keeps_latest() {
        let mut t = Transcript::new(1);
        t.add_user("question");
        t.add_bot("answer");
        assert_eq!(contents(&t), vec!["answer"]);
    }

    // ── Rendering ─────────────────────────────────────────────────

    #[test]
    fn render_includes_label_and_text() {
        let mut t = Transcript::new(10);
        t.add_bot("hi there");
        let rendered = t.lines().next().unwrap().render();
        assert!(rendered.starts_with('['));
        assert!(rendered.ends_with("] bot: hi there"));
    }

    #[test]
    fn speaker_labels() {
        assert_eq!(Speaker::User.label(), "you");
        assert_eq!(Speaker::Bot.label(), "bot");
        assert_eq!(Speaker::System.label(), "--");
    }
}
