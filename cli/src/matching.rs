use std::io::{BufRead, Write};
use std::thread;

use anyhow::Result;
use pairup_core::*;
use web_time::Instant;

use crate::prompt::{Input, next_input};

fn card_label(card: &Card) -> String {
    if card.is_face_up() {
        format!("{}♣", card.face().rank())
    } else {
        "??".to_owned()
    }
}

fn render(round: &Round, output: &mut impl Write) -> Result<()> {
    writeln!(
        output,
        "Level {}  Remaining Attempts: {}",
        round.tier(),
        round.remaining_attempts()
    )?;
    let columns = round.tier().grid_columns();
    for (row, cards) in round.deck().cards().chunks(columns).enumerate() {
        let line: Vec<String> = cards
            .iter()
            .enumerate()
            .map(|(column, card)| {
                let position = row * columns + column + 1;
                format!("{:>2}:{:<3}", position, card_label(card))
            })
            .collect();
        writeln!(output, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Blocks until the mismatched pair is due to flip back, then hides it.
fn wait_for_hide<C: Clock, R: OutcomeReporter, G: DeckGenerator>(
    game: &mut MatchingGame<C, R, G>,
    ticket: HideTicket,
) {
    thread::sleep(ticket.due().saturating_duration_since(Instant::now()));
    if !game.poll() {
        // the game clock may lag the wall clock
        game.fire_hide(ticket);
    }
}

/// Plays matching rounds of `tier` until the player quits or the input runs out.
pub(crate) fn play<C: Clock, R: OutcomeReporter, G: DeckGenerator>(
    game: &mut MatchingGame<C, R, G>,
    tier: Tier,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    game.start_round(tier);

    loop {
        let Some(round) = game.round() else {
            break;
        };
        render(round, &mut output)?;
        match round.state() {
            RoundState::Playing => write!(
                output,
                "Pick a card (1-{}), [r]etry or [q]uit: ",
                round.deck().len()
            )?,
            RoundState::Won => writeln!(
                output,
                "Congratulations! You completed Level {}! [r]etry or [q]uit",
                round.tier()
            )?,
            RoundState::Lost => writeln!(
                output,
                "Game Over. You've run out of attempts. [r]etry or [q]uit"
            )?,
        }
        output.flush()?;

        let Some(command) = next_input(&mut input)? else {
            break;
        };
        match command {
            Input::Quit => break,
            Input::Retry => {
                game.retry_round();
            }
            Input::Pick(position) => {
                let Some(id) = game.round().and_then(|round| {
                    let index = position.checked_sub(1)?;
                    round.deck().cards().get(index).map(Card::id)
                }) else {
                    writeln!(output, "There is no card {position}")?;
                    continue;
                };
                if let SelectOutcome::Mismatched(ticket) = game.select_card(id) {
                    if let Some(round) = game.round() {
                        render(round, &mut output)?;
                    }
                    writeln!(output, "No match!")?;
                    output.flush()?;
                    wait_for_hide(game, ticket);
                }
            }
            Input::Unknown => writeln!(output, "Type a card number, r or q")?,
        }
    }

    game.exit();
    Ok(())
}
