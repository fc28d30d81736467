use crate::game::quiz::definition::{AnswerLabel, ANSWER_COUNT};
use crate::game::quiz::{DisplayedRange, Session};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionState {
    Open,
    Correct,
    Incorrect,
    Unselected,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionView {
    pub label: AnswerLabel,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionView {
    pub number: usize,
    pub id: String,
    pub text: String,
    pub options: Vec<OptionView>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageView {
    pub module_title: String,
    pub page: usize,
    pub page_count: usize,
    pub range: DisplayedRange,
    pub score: u32,
    pub progress: u32,
    pub questions: Vec<QuestionView>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModuleStatus {
    pub name: String,
    pub question_count: usize,
    pub completion: Option<u32>,
}

pub fn module_title(module: &str) -> String {
    format!("Module {}", module.replacen("module", "", 1))
}

fn option_state(session: &Session, question_index: usize, display_index: usize) -> OptionState {
    if !session.is_answered(question_index) {
        return OptionState::Open;
    }
    let is_correct = session.get_questions()[question_index].is_option_correct(display_index);
    let was_chosen = session.chosen_option(question_index) == Some(display_index);
    match (was_chosen, is_correct) {
        (_, true) => OptionState::Correct,
        (true, false) => OptionState::Incorrect,
        (false, false) => OptionState::Unselected,
    }
}

impl PageView {
    pub fn from_session(session: &Session) -> Self {
        let questions = session
            .page_questions()
            .map(|(index, shuffled)| QuestionView {
                number: index + 1,
                id: shuffled.question.id.clone(),
                text: shuffled.question.question.clone(),
                options: (0..ANSWER_COUNT)
                    .filter_map(|display| {
                        let label = AnswerLabel::from_index(display)?;
                        Some(OptionView {
                            label,
                            text: shuffled.option_text(display).to_owned(),
                            state: option_state(session, index, display),
                        })
                    })
                    .collect(),
            })
            .collect();

        PageView {
            module_title: module_title(session.get_module()),
            page: session.current_page(),
            page_count: session.page_count(),
            range: session.displayed_range(),
            score: session.score(),
            progress: session.progress_percent().round() as u32,
            questions,
        }
    }
}
