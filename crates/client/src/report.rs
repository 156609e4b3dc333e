//! Text rendering of a session snapshot.
use std::fmt::Write;

use client_bootstrap::LocalSession;
use client_frontend_core::{Highlight, HighlightFlags, Motion, Preview, Snapshot};
use game_core::{CreatureView, Simulation, Stat};

/// Multi-line description of the board and the current feedback state.
pub fn summary(session: &LocalSession) -> String {
    let snapshot = session.snapshot();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "modes: {} (revision {}, generation {})",
        session.mode_names().join(" > "),
        session.engine().revision(),
        snapshot.generation()
    );

    for creature in session.engine().creatures() {
        let _ = writeln!(out, "{}", creature_line(creature, &snapshot));
    }

    if let Some(highlight) = snapshot.get::<Highlight>() {
        if !highlight.shade().is_empty() {
            let _ = writeln!(out, "reach: {} cells", highlight.shade().len());
        }
    }

    if let Some(preview) = snapshot.get::<Preview>() {
        if !preview.throb().is_empty() {
            let path: Vec<String> = preview.throb().iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "path: {}", path.join(" "));
        }
        for float in preview.floats() {
            let style = float.style.map(|s| s.to_string()).unwrap_or_default();
            let _ = writeln!(
                out,
                "  \"{}\" {style} at ({:.0}, {:.0})",
                float.text, float.at.x, float.at.y
            );
        }
    }

    if let Some(motion) = snapshot.get::<Motion>() {
        let _ = writeln!(
            out,
            "moving {}: {} -> {} ({:.0}%)",
            motion.creature,
            motion.from,
            motion.to,
            motion.progress * 100.0
        );
    }

    out
}

fn creature_line(creature: &CreatureView, snapshot: &Snapshot) -> String {
    let preview = snapshot.get::<Preview>();
    let flags = snapshot
        .get::<Highlight>()
        .map(|highlight| highlight.creature_flags(creature.id))
        .unwrap_or_default();

    let mut line = format!(
        "{:>2} {:<8} {:<6} {}",
        creature.id.0,
        creature.name,
        creature.faction.to_string(),
        creature.cell
    );

    let ap = creature.stat(Stat::ActionPoints);
    let _ = write!(line, " AP {ap}");
    if let Some(delta) = preview.and_then(|p| p.stat_delta(creature.id, Stat::ActionPoints)) {
        let _ = write!(line, " ({delta:+})");
    }

    for part in &creature.parts {
        let _ = write!(line, " {}#{} {}/{}", part.name, part.id.0, part.hp, part.max_hp);
        let target = game_core::PartTarget::new(creature.id, part.id);
        if let Some(delta) = preview.and_then(|p| p.hp_delta(target)) {
            let _ = write!(line, " ({delta:+})");
        }
    }

    if flags.contains(HighlightFlags::STATIC) {
        line.push_str(" [selected]");
    }
    if flags.contains(HighlightFlags::THROB) {
        line.push_str(" [hover]");
    }
    line
}
