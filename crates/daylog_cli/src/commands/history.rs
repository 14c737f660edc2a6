//! History command - hours per entry type over a recent range

use anyhow::Result;
use daylog_core::HistoryRange;

use super::Session;
use crate::output;

pub fn run(session: &Session, range: HistoryRange) -> Result<()> {
    let history = session.ctx.history()?.load(range)?;
    if session.json {
        return output::json(&history);
    }

    let hours = history.hours;
    let logged = hours.signal + hours.noise + hours.sleep;
    println!(
        "{} to {}",
        history.start.compact_label(),
        history.end.compact_label()
    );
    println!("signal  {:>5}", hours.signal);
    println!("noise   {:>5}", hours.noise);
    println!("sleep   {:>5}", hours.sleep);
    if logged > 0 {
        println!(
            "signal share {:.0}%",
            hours.signal as f64 * 100.0 / logged as f64
        );
    }
    Ok(())
}
