use clap::Subcommand;
use serde::Serialize;
use sportiq_core::quiz::{QuizHistory, QuizPhase};
use sportiq_core::{
    Config, Event, ProfileService, QuizCatalog, QuizSession, SportCategory, Ticker, WorkoutType,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{clock, emit, open_store, print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum QuizAction {
    /// List categories that have a quiz
    Categories,
    /// Play the quiz for a category
    Play {
        /// Sport category (e.g. "football", "martial_arts")
        category: String,
        /// Answer non-interactively, 1-based, comma separated (e.g. "2,1,3")
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<usize>>,
    },
    /// Print all stored results
    History,
    /// Print the best result per category
    Best,
}

#[derive(Serialize)]
struct CategoryRow {
    id: SportCategory,
    name: &'static str,
    icon: &'static str,
    questions: usize,
    total_points: u32,
    recommended_workouts: &'static [WorkoutType],
}

pub fn run(action: QuizAction) -> CmdResult {
    match action {
        QuizAction::Categories => {
            let catalog = load_catalog(&Config::load_or_default())?;
            let rows: Vec<CategoryRow> = catalog
                .categories()
                .filter_map(|c| catalog.quiz_for(c).ok())
                .map(|quiz| CategoryRow {
                    id: quiz.category,
                    name: quiz.category.name(),
                    icon: quiz.category.icon(),
                    questions: quiz.questions.len(),
                    total_points: quiz.total_points(),
                    recommended_workouts: quiz.category.recommended_workouts(),
                })
                .collect();
            print_json(&rows)
        }
        QuizAction::Play { category, answers } => play(&category, answers),
        QuizAction::History => print_json(&QuizHistory::new(open_store()?).load()),
        QuizAction::Best => print_json(&QuizHistory::new(open_store()?).best_by_category()),
    }
}

fn load_catalog(config: &Config) -> Result<QuizCatalog, Box<dyn std::error::Error>> {
    let limit = Some(config.quiz.default_time_limit_secs).filter(|secs| *secs > 0);
    let catalog = match &config.quiz.catalog_path {
        Some(path) => QuizCatalog::from_path(path, limit)?,
        None => QuizCatalog::bundled(limit)?,
    };
    Ok(catalog)
}

fn play(category: &str, answers: Option<Vec<usize>>) -> CmdResult {
    let category: SportCategory = category.parse()?;
    if answers.as_ref().is_some_and(|a| a.contains(&0)) {
        return Err("answers are 1-based; 0 is not an option".into());
    }
    let config = Config::load_or_default();
    let quiz = load_catalog(&config)?.quiz_for(category)?.clone();

    let store = open_store()?;
    let mut session = QuizSession::new(store.clone(), clock());
    let Some(started) = session.start(quiz) else {
        return Err(format!("the {} quiz has no questions", category.name()).into());
    };
    emit(&started);

    let completed = match answers {
        Some(answers) => play_scripted(&mut session, &answers),
        None => runtime()?.block_on(play_interactive(&mut session))?,
    };

    if let Some(Event::QuizCompleted { result, .. }) = completed {
        eprintln!(
            "{} {}/{} ({:.0}%)",
            result.grade(),
            result.score,
            result.total_possible,
            result.percentage()
        );
        let suggested: Vec<&str> = category
            .recommended_workouts()
            .iter()
            .map(|w| w.name())
            .collect();
        eprintln!("recommended workouts: {}", suggested.join(", "));
        for event in ProfileService::new(store, clock()).record_quiz(&result) {
            emit(&event);
        }
    }
    Ok(())
}

fn play_scripted(session: &mut QuizSession, answers: &[usize]) -> Option<Event> {
    for &answer in answers {
        if let Some(event) = session.select_answer(answer - 1) {
            emit(&event);
        }
        if let Some(event) = session.next_question() {
            emit(&event);
            if matches!(event, Event::QuizCompleted { .. }) {
                return Some(event);
            }
        }
    }
    session.abandon().map(|event| {
        emit(&event);
        event
    })
}

async fn play_interactive(
    session: &mut QuizSession,
) -> Result<Option<Event>, Box<dyn std::error::Error>> {
    let mut ticker = Ticker::every_second();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(session);

    while session.is_ticking() {
        tokio::select! {
            () = ticker.next() => {
                if let Some(event) = session.tick() {
                    emit(&event);
                    return Ok(Some(event));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    if let Some(event) = session.abandon() {
                        emit(&event);
                    }
                    return Ok(None);
                };
                if let Some(event) = handle_input(session, line.trim()) {
                    emit(&event);
                    match event {
                        Event::QuizCompleted { .. } | Event::QuizAbandoned { .. } => {
                            return Ok(Some(event));
                        }
                        Event::AnswerSelected { .. } => {
                            if let Some(q) = session.current_question() {
                                if !q.explanation.is_empty() {
                                    eprintln!("{}", q.explanation);
                                }
                            }
                            eprintln!("press enter to continue");
                        }
                        _ => prompt(session),
                    }
                }
            }
        }
    }
    Ok(None)
}

fn handle_input(session: &mut QuizSession, input: &str) -> Option<Event> {
    if input.eq_ignore_ascii_case("q") {
        return session.abandon();
    }
    match session.phase() {
        QuizPhase::InProgress => match input.parse::<usize>() {
            Ok(n) if n >= 1 => session.select_answer(n - 1),
            _ => {
                eprintln!("enter an option number, or q to quit");
                None
            }
        },
        QuizPhase::AnswerRevealed => session.next_question(),
        _ => None,
    }
}

fn prompt(session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let total = session.quiz().map_or(0, |q| q.questions.len());
    match session.remaining_secs() {
        Some(secs) => eprintln!(
            "\n[{}/{}] ({secs}s left) {}",
            session.current_index() + 1,
            total,
            question.prompt
        ),
        None => eprintln!("\n[{}/{}] {}", session.current_index() + 1, total, question.prompt),
    }
    for (i, option) in question.options.iter().enumerate() {
        eprintln!("  {}. {option}", i + 1);
    }
}
