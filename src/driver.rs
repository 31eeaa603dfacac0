//! # Script Driver
//!
//! A minimal host: reads action records as JSON lines, decodes them at the
//! wire boundary, dispatches into a single-threaded session, and reports
//! every outcome, route reply, and emitted event as a JSON line on the
//! output. Bad lines are reported and skipped; the script always runs to
//! the end.
//!
//! Record shape: `{"action": "DISPATCH_PUSH", "payload": {...}}`. Blank
//! lines and lines starting with `#` are skipped.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::bridge::registry::{ComponentRegistry, InMemoryComponents};
use crate::bridge::wire;
use crate::config::ResolvedConfig;
use crate::core::action::{Action, RouteReply};
use crate::core::controller::{IgnoreReason, Outcome};
use crate::core::events::ChannelSink;
use crate::session::NavigationSession;

#[derive(Deserialize)]
struct ScriptRecord {
    action: String,
    #[serde(default)]
    payload: Value,
}

fn reason_label(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::PopAtRoot => "pop_at_root",
        IgnoreReason::NoRoot => "no_root",
        IgnoreReason::NoResultTarget => "no_result_target",
        IgnoreReason::Unsubscribed => "unsubscribed",
    }
}

/// Runs one script to completion against a fresh session.
///
/// Components from the config are preregistered before the first line is
/// read; everything else the script has to register itself.
pub fn run(input: impl BufRead, mut out: impl Write, config: &ResolvedConfig) -> io::Result<()> {
    let components = Arc::new(InMemoryComponents::new());
    for entry in &config.components {
        components.register(&entry.name, entry.to_spec());
        match &entry.description {
            Some(text) => debug!("Preregistered component {} from config: {text}", entry.name),
            None => debug!("Preregistered component {} from config", entry.name),
        }
    }
    let (sink, events) = ChannelSink::new();
    let mut session = NavigationSession::new(components, Arc::new(sink));

    let mut line_no = 0usize;
    for line in input.lines() {
        let line = line?;
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<ScriptRecord>(trimmed) {
            Ok(record) => {
                process(&mut session, &record.action, record.payload, line_no, &mut out)?;
            }
            Err(err) => {
                warn!("Line {line_no}: unreadable record: {err}");
                writeln!(
                    out,
                    "{}",
                    json!({"line": line_no, "status": "error", "error": err.to_string()})
                )?;
            }
        }

        for event in events.try_iter() {
            writeln!(
                out,
                "{}",
                json!({"line": line_no, "status": "event", "event": event})
            )?;
        }
    }

    info!(
        "Script finished after {line_no} lines (depth {})",
        session.depth()
    );
    Ok(())
}

fn process(
    session: &mut NavigationSession,
    action_type: &str,
    payload: Value,
    line_no: usize,
    out: &mut impl Write,
) -> io::Result<()> {
    // Route queries carry a live reply handle instead of a payload. The
    // session is single-threaded, so the reply is resolved by the time
    // dispatch returns.
    if action_type == wire::CURRENT_ROUTE {
        let (reply, route) = RouteReply::channel();
        return match session.dispatch(Action::CurrentRoute(reply)) {
            Ok(_) => {
                let id = route.recv().ok().flatten();
                writeln!(
                    out,
                    "{}",
                    json!({"line": line_no, "status": "replied", "route": id})
                )
            }
            Err(err) => writeln!(
                out,
                "{}",
                json!({"line": line_no, "status": "error", "error": err.to_string()})
            ),
        };
    }

    let action = match wire::decode(action_type, payload) {
        Ok(action) => action,
        Err(err) => {
            warn!("Line {line_no}: {err}");
            return writeln!(
                out,
                "{}",
                json!({"line": line_no, "status": "error", "error": err.to_string()})
            );
        }
    };

    match session.dispatch(action) {
        Ok(Outcome::Applied) => writeln!(
            out,
            "{}",
            json!({"line": line_no, "status": "applied", "depth": session.depth()})
        ),
        Ok(Outcome::Replied) => {
            writeln!(out, "{}", json!({"line": line_no, "status": "replied"}))
        }
        Ok(Outcome::Ignored(reason)) => writeln!(
            out,
            "{}",
            json!({"line": line_no, "status": "ignored", "reason": reason_label(reason)})
        ),
        Err(err) => {
            warn!("Line {line_no}: {err}");
            writeln!(
                out,
                "{}",
                json!({"line": line_no, "status": "error", "error": err.to_string()})
            )
        }
    }
}
