use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use log::{debug, error, info};
use quiz_game::config::Config;
use quiz_game::quiz::{Question, QuestionBank, Quiz};

type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
type HandlerResult = AppResult<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// 1-based position among the responses currently shown.
    Answer(usize),
    Cheat,
    Skip,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "c" | "cheat" => Some(Command::Cheat),
            "s" | "skip" => Some(Command::Skip),
            "q" | "quit" => Some(Command::Quit),
            other => other.parse().ok().map(Command::Answer),
        }
    }
}

fn main() -> ExitCode {
    let dotenv_loaded = Config::load_dotenv();
    pretty_env_logger::init();
    if !dotenv_loaded {
        debug!("No .env file found, using the process environment only");
    }
    let config = Config::from_env();
    info!("Starting quiz with {:?}", config);

    let mut quiz = match load_quiz(&config) {
        Ok(quiz) => quiz,
        Err(err) => {
            error!("Failed to load questions: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = play(&mut quiz, stdin.lock(), stdout.lock()) {
        error!("Quiz aborted: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn load_quiz(config: &Config) -> AppResult<Quiz> {
    let bank = QuestionBank::open(&config.bank_path)?;
    let mut questions = bank.questions()?;
    if let Some(limit) = config.limit {
        questions.truncate(limit);
    }

    let mut quiz = Quiz::new(questions);
    if config.shuffle {
        quiz.shuffle_all();
    }
    Ok(quiz)
}

fn show_question<W: Write>(question: &Question, output: &mut W) -> io::Result<()> {
    writeln!(
        output,
        "\nQuestion {} (worth {} points)\n{}",
        question.number(),
        question.worth(),
        question.question_text()
    )?;
    for (position, (_, text)) in question.visible_responses().enumerate() {
        writeln!(output, "  {}) {}", position + 1, text)?;
    }
    let cheat_hint = if question.can_cheat() { ", c to cheat" } else { "" };
    write!(output, "Answer (number{}, s to skip, q to quit): ", cheat_hint)?;
    output.flush()
}

fn play<R: BufRead, W: Write>(quiz: &mut Quiz, mut input: R, mut output: W) -> HandlerResult {
    let mut line = String::new();

    'questions: while let Some(question) = quiz.current_mut() {
        loop {
            show_question(question, &mut output)?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("Input closed, stopping the round");
                break 'questions;
            }

            match Command::parse(&line) {
                Some(Command::Cheat) => {
                    if question.cheat() {
                        writeln!(output, "Cheat used. This question is now worth {}.", question.worth())?;
                    } else {
                        writeln!(output, "No cheats left for this question.")?;
                    }
                }
                Some(Command::Skip) => {
                    question.set_skipped();
                    writeln!(output, "Skipped.")?;
                    break;
                }
                Some(Command::Quit) => break 'questions,
                Some(Command::Answer(position)) => {
                    let index = position
                        .checked_sub(1)
                        .and_then(|p| question.visible_responses().nth(p))
                        .map(|(index, _)| index);
                    let Some(index) = index else {
                        writeln!(output, "There is no answer {}.", position)?;
                        continue;
                    };

                    question.set_response(index)?;
                    question.set_attempted();
                    if question.is_response_correct(index)? {
                        writeln!(output, "Correct! +{} points", question.worth())?;
                    } else {
                        let correct = question.correct_index();
                        let text = question.response_text(correct)?.unwrap_or_default();
                        writeln!(output, "Wrong, the answer was: {}", text)?;
                    }
                    break;
                }
                None => writeln!(output, "Didn't understand {:?}.", line.trim())?,
            }
        }
        quiz.advance();
    }

    let summary = quiz.summary();
    info!("Round finished: {:?}", summary);
    writeln!(
        output,
        "\nScore: {} / {}\nCorrect: {}  Wrong: {}  Skipped: {}  Unanswered: {}",
        summary.score,
        summary.max_score,
        summary.correct,
        summary.incorrect,
        summary.skipped,
        summary.unanswered
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_game::quiz::Outcome;

    fn quiz() -> Quiz {
        Quiz::new(vec![
            Question::new(1, "2+2?", "4", "3", Some("5"), None).unwrap(),
            Question::new(2, "Capital of France?", "Paris", "Berlin", Some("Madrid"), Some("Rome"))
                .unwrap(),
        ])
    }

    fn run(quiz: &mut Quiz, input: &str) -> String {
        let mut output = Vec::new();
        play(quiz, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(" C \n"), Some(Command::Cheat));
        assert_eq!(Command::parse("skip"), Some(Command::Skip));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("3"), Some(Command::Answer(3)));
        assert_eq!(Command::parse("banana"), None);
    }

    #[test]
    fn plays_a_round_without_shuffling() {
        let mut quiz = quiz();
        // Unshuffled, the correct answer is listed first.
        let output = run(&mut quiz, "1\nc\nc\nc\n9\n1\n");

        assert!(output.contains("Correct! +100 points"));
        assert!(output.contains("No cheats left"));
        assert!(output.contains("There is no answer 9."));
        assert!(output.contains("Correct! +25 points"));
        assert!(output.contains("Score: 125 / 200"));
    }

    #[test]
    fn cheats_remove_answers_from_the_listing() {
        let mut quiz = quiz();
        let output = run(&mut quiz, "s\nc\n3\n");

        assert_eq!(quiz.questions[0].outcome(), Outcome::Skipped);
        // After one cheat Rome is gone, so position 3 is Madrid.
        assert_eq!(quiz.questions[1].response(), Some(2));
        assert_eq!(quiz.questions[1].outcome(), Outcome::Incorrect);
        assert!(output.contains("Wrong, the answer was: Paris"));
    }

    #[test]
    fn closed_input_ends_the_round() {
        let mut quiz = quiz();
        let output = run(&mut quiz, "2\n");
        assert_eq!(quiz.questions[0].outcome(), Outcome::Incorrect);
        assert_eq!(quiz.questions[1].outcome(), Outcome::Unanswered);
        assert!(output.contains("Unanswered: 1"));
    }
}
