use chrono::{Duration, TimeZone};

use super::*;

fn make_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| Question {
            id: format!("Q{}", i + 1),
            question: format!("Question number {}?", i + 1),
            answers: [
                "A. first".to_owned(),
                "B. second".to_owned(),
                "C. third".to_owned(),
                "D. fourth".to_owned(),
            ],
            correct_answer: AnswerLabel::from_index(i % 4).unwrap(),
        })
        .collect()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

fn make_session(count: usize) -> Session {
    Session::new("module1", &make_questions(count), Settings::default())
}

fn correct_option(session: &Session, index: usize) -> usize {
    session.get_questions()[index].correct_option().index()
}

fn wrong_option(session: &Session, index: usize) -> usize {
    (correct_option(session, index) + 1) % ANSWER_COUNT
}

#[test]
fn correct_answer_increments_score() {
    let mut session = make_session(5);
    let option = correct_option(&session, 2);
    let result = session.answer(2, option).unwrap();
    assert!(result.is_correct);
    assert_eq!(result.chosen_option, result.correct_option);
    assert_eq!(session.score(), 1);
    assert_eq!(session.summary().correct, 1);
}

#[test]
fn incorrect_answer_reveals_correct_option() {
    let mut session = make_session(5);
    let option = wrong_option(&session, 0);
    let result = session.answer(0, option).unwrap();
    assert!(!result.is_correct);
    assert_eq!(result.correct_option.index(), correct_option(&session, 0));
    assert_eq!(session.score(), 0);
    assert!(session.is_answered(0));
    assert_eq!(session.chosen_option(0), Some(option));
}

#[test]
fn question_can_only_be_answered_once() {
    let mut session = make_session(5);
    let option = correct_option(&session, 1);
    session.answer(1, option).unwrap();
    assert!(session.answer(1, option).is_err());
    let other = wrong_option(&session, 1);
    assert!(session.answer(1, other).is_err());
    assert_eq!(session.score(), 1);
    assert_eq!(session.summary().answered, 1);
}

#[test]
fn rejects_out_of_range_answers() {
    let mut session = make_session(5);
    assert!(session.answer(5, 0).is_err());
    assert!(session.answer(0, 4).is_err());
    assert_eq!(session.summary().answered, 0);
}

#[test]
fn score_matches_correct_answers() {
    let mut session = make_session(30);
    for index in 0..30 {
        let option = if index % 3 == 0 {
            correct_option(&session, index)
        } else {
            wrong_option(&session, index)
        };
        session.answer(index, option).unwrap();
    }
    let summary = session.summary();
    assert_eq!(summary.answered, 30);
    assert_eq!(summary.correct, 10);
    assert_eq!(session.score(), 10);
    assert_eq!(summary.accuracy, 33);
    assert!(summary.answered <= summary.total);
}

#[test]
fn accuracy_is_zero_without_answers() {
    let session = make_session(10);
    assert_eq!(
        session.summary(),
        ResultsSummary {
            total: 10,
            answered: 0,
            correct: 0,
            accuracy: 0,
        }
    );
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(make_session(0).page_count(), 1);
    assert_eq!(make_session(1).page_count(), 1);
    assert_eq!(make_session(20).page_count(), 1);
    assert_eq!(make_session(21).page_count(), 2);
    assert_eq!(make_session(45).page_count(), 3);
}

#[test]
fn navigation_stays_in_bounds() {
    let mut session = make_session(45);
    assert!(!session.previous_page());
    assert_eq!(session.current_page(), 1);
    assert!(session.next_page());
    assert!(session.next_page());
    assert!(!session.next_page());
    assert_eq!(session.current_page(), 3);
    assert!(session.previous_page());
    assert_eq!(session.current_page(), 2);
}

#[test]
fn last_page_holds_the_remainder() {
    let mut session = make_session(45);
    assert_eq!(session.page_questions().count(), 20);
    session.next_page();
    session.next_page();
    let indices: Vec<usize> = session.page_questions().map(|(i, _)| i).collect();
    assert_eq!(indices, (40..45).collect::<Vec<_>>());
    assert_eq!(
        session.displayed_range(),
        DisplayedRange {
            first: 41,
            last: 45,
            total: 45,
        }
    );
}

#[test]
fn restart_keeps_answers() {
    let mut session = make_session(45);
    session.next_page();
    let option = correct_option(&session, 25);
    session.answer(25, option).unwrap();
    session.restart();
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.score(), 1);
    assert!(session.is_answered(25));
}

#[test]
fn progress_percent_tracks_answers() {
    let mut session = make_session(4);
    assert_eq!(session.progress_percent(), 0.0);
    session.answer(0, 0).unwrap();
    assert_eq!(session.progress_percent(), 25.0);
}

#[test]
fn saved_progress_round_trips() {
    let questions = make_questions(45);
    let mut session = Session::new("module1", &questions, Settings::default());
    session.next_page();
    for index in [3, 7, 22].iter() {
        let option = correct_option(&session, *index);
        session.answer(*index, option).unwrap();
    }
    let option = wrong_option(&session, 30);
    session.answer(30, option).unwrap();

    let saved = session.to_saved(now());
    let json = saved.to_json().unwrap();
    let loaded = SavedProgress::from_json(&json).unwrap();
    assert_eq!(loaded, saved);

    let (restored, outcome) = Session::start(
        "module1",
        &questions,
        Some(loaded),
        now() + Duration::days(1),
        Settings::default(),
    );
    assert_eq!(outcome, RestoreOutcome::Restored);
    assert_eq!(restored.current_page(), 2);
    assert_eq!(restored.score(), 3);
    assert_eq!(restored.summary(), session.summary());
    assert_eq!(restored.chosen_option(30), Some(option));
}

#[test]
fn expired_progress_is_discarded() {
    let questions = make_questions(10);
    let mut session = Session::new("module1", &questions, Settings::default());
    session.answer(0, 0).unwrap();
    let saved = session.to_saved(now());

    let (restored, outcome) = Session::start(
        "module1",
        &questions,
        Some(saved.clone()),
        now() + Duration::days(8),
        Settings::default(),
    );
    assert_eq!(outcome, RestoreOutcome::Expired);
    assert_eq!(restored.summary().answered, 0);

    let (_, outcome) = Session::start(
        "module1",
        &questions,
        Some(saved),
        now() + Duration::days(7),
        Settings::default(),
    );
    assert_eq!(outcome, RestoreOutcome::Restored);
}

#[test]
fn restore_drops_entries_outside_the_module() {
    let questions = make_questions(5);
    let mut saved = Session::new("module1", &questions, Settings::default()).to_saved(now());
    saved.answered_questions = [1, 2, 99].iter().copied().collect();
    saved.user_answers = [(1, 0), (2, 9), (3, 1), (99, 0)].iter().copied().collect();
    saved.current_page = 12;
    saved.score = 40;
    saved.correct_answers_count = 40;

    let (session, outcome) =
        Session::start("module1", &questions, Some(saved), now(), Settings::default());
    assert_eq!(outcome, RestoreOutcome::Restored);
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.summary().answered, 2);
    assert_eq!(session.chosen_option(1), Some(0));
    assert_eq!(session.chosen_option(2), None);
    assert_eq!(session.chosen_option(3), None);
    let expected = if session.get_questions()[1].is_option_correct(0) {
        1
    } else {
        0
    };
    assert_eq!(session.score(), expected);
    assert_eq!(session.summary().correct, expected);
}

#[test]
fn saved_progress_accepts_missing_fields() {
    let saved = SavedProgress::from_json(r#"{"lastAccessed": "2024-03-10T12:00:00Z"}"#).unwrap();
    assert_eq!(saved.score, 0);
    assert_eq!(saved.current_page, 1);
    assert!(saved.answered_questions.is_empty());
    assert!(SavedProgress::from_json("not json").is_err());
}

#[test]
fn saved_progress_uses_camel_case_keys() {
    let mut session = make_session(3);
    session.answer(2, 1).unwrap();
    let json = session.to_saved(now()).to_json().unwrap();
    assert!(json.contains("\"answeredQuestions\":[2]"));
    assert!(json.contains("\"userAnswers\":{\"2\":1}"));
    assert!(json.contains("\"currentPage\":1"));
    assert!(json.contains("\"lastAccessed\""));
}

#[test]
fn export_carries_the_summary() {
    let mut session = make_session(4);
    let option = correct_option(&session, 0);
    session.answer(0, option).unwrap();
    let option = wrong_option(&session, 1);
    session.answer(1, option).unwrap();
    let results = session.export(now());
    assert_eq!(results.module, "module1");
    assert_eq!(results.total_questions, 4);
    assert_eq!(results.answered_questions, 2);
    assert_eq!(results.correct_answers, 1);
    assert_eq!(results.accuracy_rate, 50);
    assert_eq!(results.file_name(), "quiz_results_module1_2024-03-10.json");

    let dir = tempfile::tempdir().unwrap();
    let path = results.write_to(dir.path()).unwrap();
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("\"accuracyRate\": 50"));
}
