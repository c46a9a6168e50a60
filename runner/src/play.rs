// ═══════════════════════════════════════════════════════════════════════
// Pass-and-play — a terminal front end over the round engine
//
// Owns no game logic: it reads a line, calls one engine operation and
// prints what came back. Press-and-hold becomes [p]eek / [h]ide.
// ═══════════════════════════════════════════════════════════════════════

use anyhow::Result;
use impostor_engine::{GameError, Phase, RosterDraft, RoundEngine, TopicCatalog};
use std::io::{BufRead, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const DISCUSSION: &str = "All set! Everyone knows their role. Let the debate begin!";

enum TopicChoice {
    Chosen,
    BackToRoster,
    Quit,
}

enum AfterRound {
    Again,
    BackToRoster,
    Quit,
}

pub struct PassAndPlay<R, W> {
    engine: RoundEngine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PassAndPlay<R, W> {
    pub fn new(engine: RoundEngine, input: R, output: W) -> Self {
        PassAndPlay { engine, input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the players quit or input ends.
    pub fn run(&mut self) -> Result<()> {
        let mut draft = RosterDraft::new();
        loop {
            if !self.edit_roster(&mut draft)? {
                return Ok(());
            }
            let roster = match draft.finish() {
                Ok(roster) => roster,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };
            self.engine.start_with(roster)?;

            loop {
                match self.select_topic()? {
                    TopicChoice::Chosen => {}
                    TopicChoice::BackToRoster => break,
                    TopicChoice::Quit => return Ok(()),
                }
                if !self.reveal()? {
                    return Ok(());
                }
                writeln!(self.output, "{}", DISCUSSION)?;

                match self.after_round()? {
                    AfterRound::Again => {
                        self.engine.reset();
                    }
                    AfterRound::BackToRoster => break,
                    AfterRound::Quit => return Ok(()),
                }
            }

            draft = self.engine.release_roster().map(RosterDraft::from).unwrap_or_default();
        }
    }

    // ── Screens ────────────────────────────────────────────────────────

    /// Returns false on end of input.
    fn edit_roster(&mut self, draft: &mut RosterDraft) -> Result<bool> {
        loop {
            writeln!(self.output, "\nWho is playing? {}", draft.counter())?;
            for (i, name) in draft.names().iter().enumerate() {
                writeln!(self.output, "  {}. {}", i + 1, name)?;
            }
            writeln!(self.output, "Type a name to add, -N to remove player N, empty line to start.")?;

            let Some(line) = self.read_line()? else { return Ok(false) };
            if line.is_empty() {
                return Ok(true);
            }
            if let Some(n) = line.strip_prefix('-').and_then(|n| n.trim().parse::<usize>().ok()) {
                match n.checked_sub(1).and_then(|i| draft.remove(i)) {
                    Some(name) => writeln!(self.output, "Removed {}.", name)?,
                    None => writeln!(self.output, "No player {}.", n)?,
                }
                continue;
            }
            if let Err(e) = draft.add(&line) {
                writeln!(self.output, "{}", e)?;
            }
        }
    }

    fn select_topic(&mut self) -> Result<TopicChoice> {
        loop {
            let topics: Vec<String> = self.engine.catalog().topic_names().map(String::from).collect();
            writeln!(self.output, "\nPick a topic:")?;
            for (i, name) in topics.iter().enumerate() {
                let soon = match self.engine.catalog().lookup(name) {
                    Some(words) if !words.is_empty() => "",
                    _ => " (coming soon)",
                };
                writeln!(self.output, "  {}. {}{}", i + 1, name, soon)?;
            }
            writeln!(self.output, "  b. back to players   q. quit")?;

            let Some(line) = self.read_line()? else { return Ok(TopicChoice::Quit) };
            let topic = match line.as_str() {
                "b" => return Ok(TopicChoice::BackToRoster),
                "q" => return Ok(TopicChoice::Quit),
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= topics.len() => topics[n - 1].clone(),
                    _ => other.to_string(),
                },
            };

            match self.engine.choose_topic(&topic) {
                Ok(_) => return Ok(TopicChoice::Chosen),
                Err(e) => self.refuse(e)?,
            }
        }
    }

    /// Walk every player through their card. Returns false on end of input.
    fn reveal(&mut self) -> Result<bool> {
        write!(self.output, "{}", CLEAR_SCREEN)?;
        while self.engine.phase() == Phase::Revealing {
            if let Some((_, name)) = self.engine.current_player() {
                writeln!(self.output, "\nPass the device to: {}", name)?;
            }
            writeln!(self.output, "[p] peek   [h] hide   [n] next player")?;

            let Some(line) = self.read_line()? else { return Ok(false) };
            match line.as_str() {
                "p" => {
                    let card = self.engine.peek()?;
                    writeln!(self.output, "  >>> {} <<<", card)?;
                }
                "h" => {
                    self.engine.conceal()?;
                    write!(self.output, "{}", CLEAR_SCREEN)?;
                }
                "n" => match self.engine.advance() {
                    Ok(Phase::Discussing) => break,
                    Ok(_) => write!(self.output, "{}", CLEAR_SCREEN)?,
                    Err(e) => self.refuse(e)?,
                },
                _ => writeln!(self.output, "Hold on: p, h or n.")?,
            }
        }
        write!(self.output, "{}", CLEAR_SCREEN)?;
        Ok(true)
    }

    fn after_round(&mut self) -> Result<AfterRound> {
        loop {
            writeln!(self.output, "[a] another round   [b] back to players   [q] quit")?;
            let Some(line) = self.read_line()? else { return Ok(AfterRound::Quit) };
            match line.as_str() {
                "a" => return Ok(AfterRound::Again),
                "b" => return Ok(AfterRound::BackToRoster),
                "q" => return Ok(AfterRound::Quit),
                _ => {}
            }
        }
    }

    /// Tell the players what went wrong and stay on the same screen, unless
    /// the error means this front end called the engine out of order.
    fn refuse(&mut self, err: GameError) -> Result<()> {
        if !err.is_recoverable() {
            return Err(err.into());
        }
        writeln!(self.output, "{}", err)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
