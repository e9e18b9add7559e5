use serde::{Deserialize, Serialize};

/// A single line of a transcript attributed to one speaker label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerTurn {
    /// Text before the first `:` on the line
    pub speaker_label: String,
    /// Spoken text after the first `:`
    pub text: String,
}

impl SpeakerTurn {
    pub fn new(speaker_label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker_label: speaker_label.into(),
            text: text.into(),
        }
    }

    /// Render the turn the way it appeared in the transcript
    pub fn render(&self) -> String {
        format!("{}: {}", self.speaker_label, self.text)
    }
}

/// A contiguous slice of turns sent to the classifier in one request
#[derive(Debug, Clone)]
pub struct TurnBatch<'a> {
    /// Zero-based position of this batch in the run
    pub index: usize,
    /// Turns in transcript order
    pub turns: &'a [SpeakerTurn],
}

impl<'a> TurnBatch<'a> {
    pub fn batch_id(&self) -> String {
        format!("batch_{}", self.index)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Split turns into contiguous batches of `batch_size`; the last batch may be shorter
pub fn batch_turns(turns: &[SpeakerTurn], batch_size: usize) -> Vec<TurnBatch<'_>> {
    let size = batch_size.max(1);
    turns
        .chunks(size)
        .enumerate()
        .map(|(index, turns)| TurnBatch { index, turns })
        .collect()
}
