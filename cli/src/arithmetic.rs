use std::io::{BufRead, Write};

use anyhow::Result;
use pairup_core::*;

use crate::prompt::{Input, next_input};

fn render(
    session: &ArithmeticSession<impl OutcomeReporter>,
    output: &mut impl Write,
) -> Result<()> {
    let problem = session.problem();
    writeln!(
        output,
        "Level {} - Problem {}/{}",
        session.tier(),
        session.problem_number(),
        session.total_problems()
    )?;
    writeln!(output, "{} ?", problem)?;
    let choices: Vec<String> = problem
        .choices
        .iter()
        .enumerate()
        .map(|(index, value)| format!("[{}] {}", index + 1, value))
        .collect();
    writeln!(output, "{}", choices.join("  "))?;
    Ok(())
}

/// Plays an arithmetic level until the player quits or the input runs out.
pub(crate) fn play<R: OutcomeReporter>(
    session: &mut ArithmeticSession<R>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    loop {
        if session.is_completed() {
            writeln!(
                output,
                "Level Complete! You got {} out of {} correct! [r]etry or [q]uit",
                session.correct_answers(),
                session.total_problems()
            )?;
        } else {
            render(session, &mut output)?;
            write!(output, "Drop an answer (1-{CHOICE_COUNT}): ")?;
        }
        output.flush()?;

        let Some(command) = next_input(&mut input)? else {
            break;
        };
        match command {
            Input::Quit => break,
            Input::Retry => session.retry(),
            Input::Pick(_) if session.is_completed() => {}
            Input::Pick(position) => {
                let problem = *session.problem();
                let Some(&value) = position
                    .checked_sub(1)
                    .and_then(|index| problem.choices.get(index))
                else {
                    writeln!(output, "There is no choice {position}")?;
                    continue;
                };
                session.drop_answer(value);
                if session.submit().has_update() {
                    if value == problem.answer {
                        writeln!(output, "Correct!")?;
                    } else {
                        writeln!(output, "Not quite, {} {}", problem, problem.answer)?;
                    }
                }
            }
            Input::Unknown => writeln!(output, "Type a choice number, r or q")?,
        }
    }
    Ok(())
}
