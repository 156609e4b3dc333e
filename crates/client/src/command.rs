//! Line commands read from stdin.
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use client_bootstrap::LocalSession;
use client_frontend_core::Focus;
use game_core::{Cell, CreatureId, PartId, PartTarget};

pub const HELP: &str = "\
commands:
  enter Q R        pointer enters tile (Q, R)
  exit Q R         pointer leaves tile (Q, R)
  click Q R        click tile (Q, R)
  hover-part C P   pointer enters part P of creature C
  leave-part       pointer leaves the hovered part
  click-part C P   click part P of creature C
  end              end the turn
  show             print the board
  help             print this help
  quit             exit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Enter(Cell),
    Exit(Cell),
    Click(Cell),
    HoverPart(PartTarget),
    LeavePart,
    ClickPart(PartTarget),
    EndTurn,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Feeds an input command to the session.
    ///
    /// `Show`, `Help` and `Quit` are handled by the caller and do nothing here.
    pub fn apply(self, session: &mut LocalSession) -> Result<()> {
        match self {
            Command::Enter(cell) => session.tile_entered(cell),
            Command::Exit(cell) => session.tile_exited(cell),
            Command::Click(cell) => session.tile_clicked(cell)?,
            Command::HoverPart(target) => {
                if let Some(previous) = hovered_part(session) {
                    session.part_left(previous);
                }
                session.part_entered(target);
            }
            Command::LeavePart => match hovered_part(session) {
                Some(target) => session.part_left(target),
                None => bail!("no part is hovered"),
            },
            Command::ClickPart(target) => session.part_clicked(target)?,
            Command::EndTurn => session.end_turn()?,
            Command::Show | Command::Help | Command::Quit => {}
        }
        Ok(())
    }
}

fn hovered_part(session: &LocalSession) -> Option<PartTarget> {
    session.snapshot().get::<Focus>().and_then(Focus::current_part)
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<i32> = words
            .map(|word| {
                word.parse()
                    .with_context(|| format!("`{word}` is not an integer"))
            })
            .collect::<Result<_>>()?;

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("enter", [q, r]) => Command::Enter(Cell::new(*q, *r)),
            ("exit", [q, r]) => Command::Exit(Cell::new(*q, *r)),
            ("click", [q, r]) => Command::Click(Cell::new(*q, *r)),
            ("hover-part", [c, p]) => Command::HoverPart(part(*c, *p)?),
            ("click-part", [c, p]) => Command::ClickPart(part(*c, *p)?),
            ("leave-part", []) => Command::LeavePart,
            ("end", []) => Command::EndTurn,
            ("show", []) => Command::Show,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            (verb, args) => bail!("unrecognised command `{verb}` with {} argument(s)", args.len()),
        };
        Ok(command)
    }
}

fn part(creature: i32, part: i32) -> Result<PartTarget> {
    let creature = u32::try_from(creature).map_err(|_| anyhow!("creature ids are non-negative"))?;
    let part = u32::try_from(part).map_err(|_| anyhow!("part ids are non-negative"))?;
    Ok(PartTarget::new(CreatureId(creature), PartId(part)))
}
