//! Share text printed when the player leaves a finished game.

/// Title and body of the share message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
}

impl ShareMessage {
    pub fn to_plain_text(&self) -> String {
        format!("{}\n{}", self.title, self.text)
    }
}

/// Build the share message for a final score and board picture
/// (see `GameState::board_text`).
pub fn share_message(score: u32, board_text: &str) -> ShareMessage {
    ShareMessage {
        title: format!("I scored {} in Emerji", score),
        text: format!("And my field looks like this:\n\n{}", board_text),
    }
}
