//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `docdesk_core` linkage without the Flutter/FFI runtime.
//! - Drive one add-and-list cycle with deterministic output.

use docdesk_core::{DeskConfig, DocumentFields, NoopHooks, Session};
use std::process::ExitCode;
use std::time::{Duration, Instant};

fn main() -> ExitCode {
    println!("docdesk_core ping={}", docdesk_core::ping());
    println!("docdesk_core version={}", docdesk_core::core_version());

    let config = match DeskConfig::default().with_pending_delay(Duration::ZERO) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut session = Session::new(config, NoopHooks);
    let input = DocumentFields::new("Smoke document", "Created by the docdesk CLI smoke run.");
    let now = Instant::now();
    if let Err(err) = session.submit(&input, None, now) {
        eprintln!("submit failed: {err}");
        return ExitCode::FAILURE;
    }
    let resolved = session.resolve_due(now).map(|resolved| resolved.toast.message());
    println!("docdesk_core resolved={}", resolved.unwrap_or("none"));

    let projection = session.projection();
    println!("docdesk_core documents={}", projection.total_count);
    for row in &projection.rows {
        println!("{}. {}", row.ordinal, row.document.title);
    }
    ExitCode::SUCCESS
}
