//! The four-question intake stepper.
//!
//! Flow: Question(0) → … → Question(3) → Loading → ShowingRoadmap.
//! A failed generation lands in `Failed`, from which `retry` goes back to
//! `Loading` with the same answers. `reset` starts over from the first question.

use serde::Serialize;
use shared::RoadmapSuggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeKey {
    Goals,
    Background,
    Skills,
    Time,
}

impl IntakeKey {
    pub fn as_str(self) -> &'static str {
        match self {
            IntakeKey::Goals => "goals",
            IntakeKey::Background => "background",
            IntakeKey::Skills => "skills",
            IntakeKey::Time => "time",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub key: IntakeKey,
    pub prompt: &'static str,
    pub placeholder: &'static str,
}

pub const QUESTIONS: [Question; 4] = [
    Question {
        key: IntakeKey::Goals,
        prompt: "What are your educational or career goals?",
        placeholder: "e.g., Become a software developer, Start a business...",
    },
    Question {
        key: IntakeKey::Background,
        prompt: "What is your educational background?",
        placeholder: "e.g., High school, Bachelor's degree...",
    },
    Question {
        key: IntakeKey::Skills,
        prompt: "What skills do you currently have?",
        placeholder: "e.g., Programming, Marketing, Design...",
    },
    Question {
        key: IntakeKey::Time,
        prompt: "How much time can you dedicate weekly?",
        placeholder: "e.g., 5 hours, 10 hours...",
    },
];

/// A complete set of answers. Only [`IntakeFlow`] builds one, and only once
/// every question has been answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeAnswers {
    pub goals: String,
    pub background: String,
    pub skills: String,
    pub time: String,
}

impl IntakeAnswers {
    pub fn get(&self, key: IntakeKey) -> &str {
        match key {
            IntakeKey::Goals => &self.goals,
            IntakeKey::Background => &self.background,
            IntakeKey::Skills => &self.skills,
            IntakeKey::Time => &self.time,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct IntakeDraft {
    goals: Option<String>,
    background: Option<String>,
    skills: Option<String>,
    time: Option<String>,
}

impl IntakeDraft {
    fn set(&mut self, key: IntakeKey, value: String) {
        let slot = match key {
            IntakeKey::Goals => &mut self.goals,
            IntakeKey::Background => &mut self.background,
            IntakeKey::Skills => &mut self.skills,
            IntakeKey::Time => &mut self.time,
        };
        *slot = Some(value);
    }

    fn complete(&self) -> Option<IntakeAnswers> {
        Some(IntakeAnswers {
            goals: self.goals.clone()?,
            background: self.background.clone()?,
            skills: self.skills.clone()?,
            time: self.time.clone()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeState {
    Question(usize),
    Loading,
    ShowingRoadmap(RoadmapSuggestion),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct IntakeFlow {
    state: IntakeState,
    draft: IntakeDraft,
    answers: Option<IntakeAnswers>,
}

impl Default for IntakeFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeFlow {
    pub fn new() -> Self {
        Self {
            state: IntakeState::Question(0),
            draft: IntakeDraft::default(),
            answers: None,
        }
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            IntakeState::Question(i) => QUESTIONS.get(i),
            _ => None,
        }
    }

    /// `(step, total)` with a 1-based step, while a question is showing.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            IntakeState::Question(i) => Some((i + 1, QUESTIONS.len())),
            _ => None,
        }
    }

    /// The frozen answers, once generation has been triggered.
    pub fn answers(&self) -> Option<&IntakeAnswers> {
        self.answers.as_ref()
    }

    pub fn roadmap(&self) -> Option<&RoadmapSuggestion> {
        match &self.state {
            IntakeState::ShowingRoadmap(roadmap) => Some(roadmap),
            _ => None,
        }
    }

    /// Answers the current question.
    ///
    /// Blank input and input outside a question state are ignored. Answering
    /// the last question moves to `Loading` and returns the answers to
    /// generate from.
    pub fn submit(&mut self, text: &str) -> Option<IntakeAnswers> {
        let IntakeState::Question(index) = self.state else {
            return None;
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.draft.set(QUESTIONS[index].key, text.to_string());
        if index + 1 < QUESTIONS.len() {
            self.state = IntakeState::Question(index + 1);
            return None;
        }

        let answers = self.draft.complete()?;
        self.answers = Some(answers.clone());
        self.state = IntakeState::Loading;
        Some(answers)
    }

    /// Records the outcome of generation. Ignored unless `Loading`.
    pub fn complete(&mut self, result: Result<RoadmapSuggestion, String>) {
        if self.state != IntakeState::Loading {
            return;
        }
        self.state = match result {
            Ok(roadmap) => IntakeState::ShowingRoadmap(roadmap),
            Err(message) => IntakeState::Failed(message),
        };
    }

    /// From `Failed`, goes back to `Loading` and returns the same answers.
    pub fn retry(&mut self) -> Option<IntakeAnswers> {
        if !matches!(self.state, IntakeState::Failed(_)) {
            return None;
        }
        let answers = self.answers.clone()?;
        self.state = IntakeState::Loading;
        Some(answers)
    }

    /// "New Roadmap": forget everything and go back to the first question.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
