use crate::game::quiz::definition::{AnswerLabel, Question, ANSWER_COUNT};


/// Sine-based pseudo random sequence. Cheap and reproducible, not random in
/// any statistical sense.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: f64,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        SeededRandom { seed: seed as f64 }
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        let x = self.seed.sin() * 10000.0;
        self.seed += 1.0;
        x - x.floor()
    }

    fn index_up_to(&mut self, i: usize) -> usize {
        let j = (self.next() * (i + 1) as f64).floor() as usize;
        j.min(i)
    }
}

pub fn module_seed(module: &str) -> u32 {
    module.chars().last().map(|c| c as u32).unwrap_or(0)
}

fn answer_seed(module_seed: u32, position: usize) -> u32 {
    module_seed
        .wrapping_mul(31)
        .wrapping_add(position as u32)
        .wrapping_add(1)
}

fn fisher_yates<T>(items: &mut [T], rng: &mut SeededRandom) {
    for i in (1..items.len()).rev() {
        let j = rng.index_up_to(i);
        items.swap(i, j);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffledQuestion {
    pub question: Question,
    /// `original_indices[display]` is the position of that answer in the bank.
    pub original_indices: [usize; ANSWER_COUNT],
}

impl ShuffledQuestion {
    pub fn option_text(&self, display_index: usize) -> &str {
        self.original_indices
            .get(display_index)
            .map(|original| self.question.answer_text(*original))
            .unwrap_or_default()
    }

    pub fn is_option_correct(&self, display_index: usize) -> bool {
        self.original_indices
            .get(display_index)
            .map(|original| self.question.is_answer_correct(*original))
            .unwrap_or(false)
    }

    pub fn correct_option(&self) -> AnswerLabel {
        let display_index = self
            .original_indices
            .iter()
            .position(|original| *original == self.question.correct_answer.index())
            .unwrap_or_default();
        AnswerLabel::from_index(display_index).unwrap_or(AnswerLabel::A)
    }
}

/// Orders a module's questions and each question's answers, reproducibly for
/// a given module name.
pub fn shuffle_module(module: &str, questions: &[Question]) -> Vec<ShuffledQuestion> {
    let seed = module_seed(module);
    let mut rng = SeededRandom::new(seed);

    let mut ordered = questions.to_vec();
    fisher_yates(&mut ordered, &mut rng);

    ordered
        .into_iter()
        .enumerate()
        .map(|(position, question)| {
            let mut rng = SeededRandom::new(answer_seed(seed, position));
            let mut original_indices = [0, 1, 2, 3];
            fisher_yates(&mut original_indices, &mut rng);
            ShuffledQuestion {
                question,
                original_indices,
            }
        })
        .collect()
}
