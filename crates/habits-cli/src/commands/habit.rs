//! Habit command handlers

use anyhow::{bail, Result};

use habits_core::{Clock, Habit, KeyValueStore, Tracker};

use crate::output::Output;
use crate::prompt::{confirm, prompt_with_default};

/// Add a new habit
pub fn add(tracker: &mut Tracker, title: String, output: &Output) -> Result<()> {
    let Some(habit) = tracker.add_habit(&title) else {
        bail!("Habit title cannot be blank");
    };

    output.success(&format!("Added habit: {}", habit.title));
    output.print_habit(&habit);
    Ok(())
}

/// List all habits with today's completion
pub fn list(tracker: &Tracker, output: &Output) -> Result<()> {
    output.print_habits(tracker.habits());
    Ok(())
}

/// Flip today's completion for a habit
pub fn toggle(tracker: &mut Tracker, id: String, output: &Output) -> Result<()> {
    let id = resolve_habit_id(tracker, &id)?;
    tracker.toggle_habit(&id);

    if let Some(habit) = tracker.ledger().habit(&id) {
        let state = if habit.completed { "done" } else { "not done" };
        output.success(&format!("{} marked {}", habit.title, state));
    }
    Ok(())
}

/// Rename a habit, prompting for the title when not given
pub fn edit(
    tracker: &mut Tracker,
    id: String,
    title: Option<String>,
    output: &Output,
) -> Result<()> {
    let id = resolve_habit_id(tracker, &id)?;
    let current = find(tracker, &id)?.title.clone();

    let title = match title {
        Some(title) => title,
        None => match prompt_with_default("Title", &current)? {
            Some(title) => title,
            None => {
                output.message("Title unchanged.");
                return Ok(());
            }
        },
    };

    if !tracker.edit_habit(&id, &title) {
        bail!("Habit title cannot be blank");
    }

    output.success("Habit updated");
    output.print_habit(find(tracker, &id)?);
    Ok(())
}

/// Delete a habit
pub fn delete(tracker: &mut Tracker, id: String, yes: bool, output: &Output) -> Result<()> {
    let id = resolve_habit_id(tracker, &id)?;
    let habit = find(tracker, &id)?.clone();

    if !yes && output.should_prompt() {
        println!("Delete habit: {} - {}", id, habit.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    tracker.delete_habit(&id);
    output.success(&format!("Deleted habit: {}", habit.title));
    Ok(())
}

fn find<'a, S: KeyValueStore, C: Clock>(
    tracker: &'a Tracker<S, C>,
    id: &str,
) -> Result<&'a Habit> {
    tracker
        .ledger()
        .habit(id)
        .ok_or_else(|| anyhow::anyhow!("Habit not found: {}", id))
}

/// Resolve a habit ID (supports full ID or unique prefix)
pub fn resolve_habit_id<S: KeyValueStore, C: Clock>(
    tracker: &Tracker<S, C>,
    id: &str,
) -> Result<String> {
    // Exact match first; stored ids need not be UUIDs
    if tracker.ledger().habit(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = tracker
        .habits()
        .iter()
        .filter(|h| h.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No habit found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple habits match '{}':", id);
            for habit in &matches {
                eprintln!("  {} - {}", habit.id, habit.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
