//! Turns engine reports into the text, sound cue and celebration the page
//! shows.

use serde::{Deserialize, Serialize};
use storygame_core::{
    CheckReport, HintReport, MoveError, MoveOutcome, MoveReport, Progress, SearchProgress,
    SelectionOutcome, SelectionReport,
};

const ALL_CORRECT: &str = "All correct — great teamwork!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Neutral,
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    Pop,
    Ding,
}

impl Sound {
    /// Tone frequency in Hz for a short beep.
    pub fn frequency(self) -> f32 {
        match self {
            Sound::Pop => 520.0,
            Sound::Ding => 740.0,
        }
    }
}

/// The badge modal shown once a puzzle is solved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub title: String,
    pub sub: String,
    pub badge: String,
}

impl Celebration {
    pub fn reorder() -> Self {
        Self {
            title: "Great teamwork!".to_string(),
            sub: "You put the story in the right order.".to_string(),
            badge: "Bible Explorer".to_string(),
        }
    }

    pub fn word_search() -> Self {
        Self {
            title: "Well done!".to_string(),
            sub: "You found all the words.".to_string(),
            badge: "Word Search Star".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<P> {
    /// Empty when there is nothing to say.
    pub message: String,
    pub severity: Severity,
    pub sound: Option<Sound>,
    pub progress: P,
    pub celebration: Option<Celebration>,
}

/// The player action a reorder report came from. Lock rejections are worded
/// differently depending on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTray,
    SelectSlot,
    /// Slot tap with nothing selected.
    ActivateSlot,
    Place,
    Swap,
    Return,
    Shuffle,
    Lock,
    Undo,
    Reset,
}

#[derive(Debug, Clone)]
pub struct Feedback {
    sound: bool,
    celebration: Celebration,
}

impl Feedback {
    pub fn new(sound: bool, celebration: Celebration) -> Self {
        Self { sound, celebration }
    }

    /// `Some(sound)` only when sound is enabled.
    pub fn cue(&self, sound: Sound) -> Option<Sound> {
        self.sound.then_some(sound)
    }

    fn respond<P>(
        &self,
        message: impl Into<String>,
        severity: Severity,
        sound: Option<Sound>,
        progress: P,
    ) -> Response<P> {
        Response {
            message: message.into(),
            severity,
            sound: sound.and_then(|s| self.cue(s)),
            progress,
            celebration: None,
        }
    }

    fn celebrate<P>(&self, message: impl Into<String>, progress: P) -> Response<P> {
        Response {
            celebration: Some(self.celebration.clone()),
            ..self.respond(message, Severity::Positive, Some(Sound::Ding), progress)
        }
    }

    pub fn reorder(&self, action: Action, report: &MoveReport) -> Response<Progress> {
        let progress = report.progress;
        if progress.just_solved {
            return self.celebrate(ALL_CORRECT, progress);
        }

        match &report.outcome {
            MoveOutcome::Selected { .. } | MoveOutcome::Deselected => {
                self.respond("", Severity::Neutral, Some(Sound::Pop), progress)
            }
            MoveOutcome::Ignored => self.respond("", Severity::Neutral, None, progress),
            MoveOutcome::Placed { .. } | MoveOutcome::Swapped { .. } | MoveOutcome::Returned { .. } => {
                self.respond("", Severity::Neutral, Some(Sound::Pop), progress)
            }
            MoveOutcome::Shuffled => {
                self.respond("Shuffled the tray.", Severity::Neutral, Some(Sound::Pop), progress)
            }
            MoveOutcome::Locked { .. } => self.respond(
                "Locked the cards that are currently correct.",
                Severity::Neutral,
                Some(Sound::Pop),
                progress,
            ),
            MoveOutcome::Undone => {
                self.respond("Undid one step.", Severity::Neutral, Some(Sound::Pop), progress)
            }
            MoveOutcome::Reset => self.respond("Reset. Start again!", Severity::Neutral, None, progress),
            MoveOutcome::Rejected { error } => self.rejected(action, error, progress),
        }
    }

    fn rejected(&self, action: Action, error: &MoveError, progress: Progress) -> Response<Progress> {
        match error {
            MoveError::LockedSlot { .. } => {
                let (message, severity) = match action {
                    Action::SelectSlot => ("That card is locked (already correct).", Severity::Neutral),
                    Action::Swap => ("Locked cards can’t be moved.", Severity::Negative),
                    Action::Return => ("That card is locked.", Severity::Negative),
                    _ => ("That box is locked.", Severity::Negative),
                };
                self.respond(message, severity, Some(Sound::Pop), progress)
            }
            MoveError::NoHistory => self.respond("Nothing to undo.", Severity::Neutral, None, progress),
            MoveError::SlotOutOfRange { index, .. } => self.respond(
                format!("There is no box {}.", index + 1),
                Severity::Negative,
                Some(Sound::Pop),
                progress,
            ),
            MoveError::NotInTray { .. } => self.respond(
                "That card is not in the tray.",
                Severity::Negative,
                Some(Sound::Pop),
                progress,
            ),
        }
    }

    /// The "Check" button. A solved board celebrates again.
    pub fn check(&self, report: &CheckReport) -> Response<Progress> {
        let progress = Progress {
            correct: report.correct,
            total: report.total,
            solved: report.solved,
            just_solved: false,
        };
        if report.solved {
            return self.celebrate(ALL_CORRECT, progress);
        }
        self.respond(
            format!(
                "So far: {}/{} correct. Try Hint or Lock correct.",
                report.correct, report.total
            ),
            Severity::Negative,
            Some(Sound::Pop),
            progress,
        )
    }

    pub fn hint(&self, report: &HintReport, progress: Progress) -> Response<Progress> {
        match report {
            HintReport::Hint(hint) => {
                let text = if hint.tile.secondary.is_empty() {
                    hint.tile.primary.clone()
                } else {
                    format!("{} / {}", hint.tile.primary, hint.tile.secondary)
                };
                self.respond(
                    format!("Hint: Box {} should be “{}”.", hint.slot + 1, text),
                    Severity::Neutral,
                    Some(Sound::Pop),
                    progress,
                )
            }
            HintReport::AlreadyComplete => {
                self.respond("Already perfect!", Severity::Positive, Some(Sound::Ding), progress)
            }
        }
    }

    pub fn word_search(&self, report: &SelectionReport) -> Response<SearchProgress> {
        let progress = report.progress;
        match &report.outcome {
            SelectionOutcome::Found { word, .. } if progress.just_completed => {
                self.celebrate(format!("Found: {word}"), progress)
            }
            SelectionOutcome::Found { word, .. } => {
                self.respond(format!("Found: {word}"), Severity::Positive, Some(Sound::Pop), progress)
            }
            SelectionOutcome::Candidate { letters } if letters.is_empty() => {
                self.respond("", Severity::Neutral, None, progress)
            }
            SelectionOutcome::Candidate { letters } => {
                self.respond(format!("Selected: {letters}"), Severity::Neutral, None, progress)
            }
            SelectionOutcome::Cleared | SelectionOutcome::NewGrid { .. } => {
                self.respond("", Severity::Neutral, None, progress)
            }
            SelectionOutcome::Rejected { error } => {
                self.respond(error.to_string(), Severity::Negative, None, progress)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storygame_core::{Hint, SelectionError, Tile, TileId};

    fn progress(correct: usize, total: usize) -> Progress {
        Progress {
            correct,
            total,
            solved: correct == total,
            just_solved: false,
        }
    }

    fn report(outcome: MoveOutcome, progress: Progress) -> MoveReport {
        MoveReport { outcome, progress }
    }

    fn feedback(sound: bool) -> Feedback {
        Feedback::new(sound, Celebration::reorder())
    }

    #[test]
    fn test_sound_follows_config() {
        let r = report(MoveOutcome::Shuffled, progress(0, 3));
        assert_eq!(feedback(true).reorder(Action::Shuffle, &r).sound, Some(Sound::Pop));
        assert_eq!(feedback(false).reorder(Action::Shuffle, &r).sound, None);
        assert_eq!(feedback(false).reorder(Action::Shuffle, &r).message, "Shuffled the tray.");
    }

    #[test]
    fn test_lock_messages_depend_on_action() {
        let r = report(
            MoveOutcome::Rejected {
                error: MoveError::LockedSlot { slot: 0 },
            },
            progress(1, 3),
        );
        let fb = feedback(true);
        assert_eq!(fb.reorder(Action::Place, &r).message, "That box is locked.");
        assert_eq!(fb.reorder(Action::Swap, &r).message, "Locked cards can’t be moved.");
        assert_eq!(fb.reorder(Action::Return, &r).message, "That card is locked.");
        let select = fb.reorder(Action::SelectSlot, &r);
        assert_eq!(select.message, "That card is locked (already correct).");
        assert_eq!(select.severity, Severity::Neutral);
        assert_eq!(fb.reorder(Action::Place, &r).severity, Severity::Negative);
    }

    #[test]
    fn test_completion_celebrates() {
        let mut p = progress(3, 3);
        p.just_solved = true;
        let r = report(
            MoveOutcome::Placed {
                tile: TileId::from("c"),
                slot: 2,
                displaced: None,
            },
            p,
        );
        let response = feedback(true).reorder(Action::Place, &r);
        assert_eq!(response.message, "All correct — great teamwork!");
        assert_eq!(response.severity, Severity::Positive);
        assert_eq!(response.sound, Some(Sound::Ding));
        assert_eq!(response.celebration, Some(Celebration::reorder()));

        let ignored = report(MoveOutcome::Ignored, progress(3, 3));
        let quiet = feedback(true).reorder(Action::Place, &ignored);
        assert_eq!(quiet.celebration, None);
    }

    #[test]
    fn test_undo_and_reset_messages() {
        let fb = feedback(true);
        let nothing = report(
            MoveOutcome::Rejected {
                error: MoveError::NoHistory,
            },
            progress(0, 2),
        );
        let response = fb.reorder(Action::Undo, &nothing);
        assert_eq!(response.message, "Nothing to undo.");
        assert_eq!(response.sound, None);
        assert_eq!(
            fb.reorder(Action::Undo, &report(MoveOutcome::Undone, progress(0, 2))).message,
            "Undid one step."
        );
        assert_eq!(
            fb.reorder(Action::Reset, &report(MoveOutcome::Reset, progress(0, 2))).message,
            "Reset. Start again!"
        );
    }

    #[test]
    fn test_check_messages() {
        let fb = feedback(false);
        let partial = fb.check(&CheckReport {
            correct: 1,
            total: 4,
            solved: false,
        });
        assert_eq!(partial.message, "So far: 1/4 correct. Try Hint or Lock correct.");
        assert_eq!(partial.severity, Severity::Negative);
        assert!(partial.celebration.is_none());

        let solved = fb.check(&CheckReport {
            correct: 4,
            total: 4,
            solved: true,
        });
        assert_eq!(solved.message, "All correct — great teamwork!");
        assert!(solved.celebration.is_some());
    }

    #[test]
    fn test_hint_messages() {
        let fb = feedback(true);
        let hint = HintReport::Hint(Hint {
            slot: 2,
            tile: Tile::new("exodus", "Exodus", "出埃及"),
            location: None,
        });
        assert_eq!(
            fb.hint(&hint, progress(2, 5)).message,
            "Hint: Box 3 should be “Exodus / 出埃及”."
        );

        let bare = HintReport::Hint(Hint {
            slot: 0,
            tile: Tile::bare("Creation"),
            location: None,
        });
        assert_eq!(fb.hint(&bare, progress(0, 5)).message, "Hint: Box 1 should be “Creation”.");

        let done = fb.hint(&HintReport::AlreadyComplete, progress(5, 5));
        assert_eq!(done.message, "Already perfect!");
        assert_eq!(done.sound, Some(Sound::Ding));
    }

    #[test]
    fn test_word_search_messages() {
        let fb = Feedback::new(true, Celebration::word_search());
        let mut p = SearchProgress {
            found: 1,
            placed: 2,
            complete: false,
            just_completed: false,
        };
        let found = SelectionReport {
            outcome: SelectionOutcome::Found {
                word: "DOG".into(),
                reversed: true,
            },
            progress: p,
        };
        let response = fb.word_search(&found);
        assert_eq!(response.message, "Found: DOG");
        assert_eq!(response.sound, Some(Sound::Pop));
        assert!(response.celebration.is_none());

        p.found = 2;
        p.complete = true;
        p.just_completed = true;
        let last = SelectionReport {
            outcome: SelectionOutcome::Found {
                word: "CAT".into(),
                reversed: false,
            },
            progress: p,
        };
        let response = fb.word_search(&last);
        assert_eq!(response.message, "Found: CAT");
        assert_eq!(response.celebration, Some(Celebration::word_search()));

        let selecting = SelectionReport {
            outcome: SelectionOutcome::Candidate {
                letters: "DO".into(),
            },
            progress: p,
        };
        assert_eq!(fb.word_search(&selecting).message, "Selected: DO");

        let rejected = SelectionReport {
            outcome: SelectionOutcome::Rejected {
                error: SelectionError::OutOfBounds { row: 9, col: 0, size: 4 },
            },
            progress: p,
        };
        assert_eq!(fb.word_search(&rejected).severity, Severity::Negative);
    }

    #[test]
    fn test_response_serializes_lowercase_tags() {
        let shuffled = report(MoveOutcome::Shuffled, progress(0, 1));
        let response = feedback(true).reorder(Action::Shuffle, &shuffled);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["severity"], "neutral");
        assert_eq!(json["sound"], "pop");
        assert_eq!(json["progress"]["total"], 1);
    }
}
