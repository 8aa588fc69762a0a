//! Expiry sweep command
//!
//! One-shot by default; `--watch` keeps sweeping at the configured
//! interval. Each pass takes the workspace lock, so concurrent accepts
//! and sweeps serialize on the same committed state.

use anyhow::Result;
use chrono::Utc;

use super::output::Output;
use crate::engine::sweeper;
use crate::storage::Project;

pub fn run(watch: bool, output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let interval = project.config().sweep_interval();

    loop {
        // Scoped so the lock is released before any sleep
        let report = {
            let mut ws = project.begin()?;
            let report = sweeper::sweep(&mut ws.snapshot, Utc::now());
            if report.count() > 0 {
                ws.commit()?;
            }
            report
        };

        if output.is_json() {
            output.data(&report);
        } else if report.count() > 0 {
            output.success(&format!("Expired {} overdue assignments", report.count()));
        } else {
            output.success("Nothing to expire");
        }

        if !watch {
            return Ok(());
        }
        output.verbose_ctx("sweep", &format!("sleeping {:?}", interval));
        std::thread::sleep(interval);
    }
}
