//! Busy-signal sources.
//!
//! The renderer core only ever sees a [`BusyFlag`]; this module owns the
//! writes. Three sources: manual key toggling, a demo oscillator, and a
//! stdin line protocol so an external process can pipe its processing state
//! in (`my-backend | nimbus`).

use std::io::BufRead;
use std::time::Instant;

use nimbus_common::BusyFlag;
use nimbus_config::schema::{SignalConfig, SignalSource};

/// Feeds the shared busy flag from the configured source.
pub struct SignalDriver {
    flag: BusyFlag,
    source: Source,
}

enum Source {
    Manual,
    Auto { period_secs: f64, started: Instant },
    Stdin,
}

impl SignalDriver {
    /// Set up the configured source. The stdin source spawns a reader thread
    /// that writes the flag directly; the event loop never blocks on it.
    pub fn start(config: &SignalConfig, flag: BusyFlag) -> Self {
        let source = match config.source {
            SignalSource::Manual => Source::Manual,
            SignalSource::Auto => Source::Auto {
                period_secs: config.auto_period_secs,
                started: Instant::now(),
            },
            SignalSource::Stdin => {
                spawn_stdin_reader(flag.clone());
                Source::Stdin
            }
        };
        Self { flag, source }
    }

    /// Advance time-driven sources. Called once per tick; manual and stdin
    /// sources are no-ops here (their writes come from keys / the reader
    /// thread).
    pub fn poll(&mut self) {
        if let Source::Auto {
            period_secs,
            started,
        } = self.source
        {
            let phase = started.elapsed().as_secs_f64() % period_secs;
            self.flag.set(phase >= period_secs / 2.0);
        }
    }

    /// Manual toggle (space bar). Ignored unless the source is `manual`, so
    /// a key press can't fight the oscillator or an external process.
    pub fn toggle(&self) -> Option<bool> {
        match self.source {
            Source::Manual => Some(self.flag.toggle()),
            _ => None,
        }
    }
}

fn spawn_stdin_reader(flag: BusyFlag) {
    let spawned = std::thread::Builder::new()
        .name("nimbus-signal-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        tracing::warn!("signal stdin read failed: {e}");
                        break;
                    }
                };
                match parse_signal_line(&line) {
                    Some(busy) => flag.set(busy),
                    None if line.trim().is_empty() => {}
                    None => tracing::warn!("ignoring unrecognized signal line: {line:?}"),
                }
            }
            tracing::info!("signal stdin closed; keeping last state");
        });
    if let Err(e) = spawned {
        tracing::warn!("failed to spawn signal reader thread: {e}");
    }
}

/// Parse one line of the stdin protocol.
pub fn parse_signal_line(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "busy" | "1" | "true" | "on" => Some(true),
        "idle" | "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
