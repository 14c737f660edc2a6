//! Stats command - completion counts per window

use anyhow::Result;

use super::Session;
use crate::output;

pub fn run(session: &Session) -> Result<()> {
    let mut service = session.ctx.stats()?;
    let stats = service.refresh()?;
    if session.json {
        return output::json(stats);
    }

    println!(
        "{:<14} {:>6} {:>6} {:>8} {:>6}",
        "", "week", "month", "quarter", "year"
    );
    let rows = [
        ("project tasks", stats.project_tasks),
        ("projects", stats.projects),
    ];
    for (label, counts) in rows {
        println!(
            "{:<14} {:>6} {:>6} {:>8} {:>6}",
            label, counts.week, counts.month, counts.quarter, counts.year
        );
    }
    Ok(())
}
