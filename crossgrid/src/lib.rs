//! # crossgrid
//!
//! Terminal front end for the crossgrid-core crossword engine: player
//! configuration, key scripts and text rendering.

pub mod config;
pub mod render;
pub mod script;

pub use config::PlayerConfig;
pub use render::{entry_summaries, render_board, render_entries, render_status, EntrySummary};
pub use script::{parse_keys, ScriptError};

use anyhow::Context;
use crossgrid_core::{Controller, KeyResult};

/// Replay a key script against a controller. Returns how many keys were
/// handled; unhandled keys are skipped.
pub fn play_script(controller: &mut Controller, script: &str) -> anyhow::Result<usize> {
    let keys = parse_keys(script).context("parsing key script")?;
    let mut handled = 0;
    for key in keys {
        let result = controller
            .process_key(key.clone())
            .with_context(|| format!("processing {key:?}"))?;
        if result == KeyResult::Handled {
            handled += 1;
        } else {
            tracing::debug!(?key, "key not handled");
        }
    }
    Ok(handled)
}
