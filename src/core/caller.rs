//! Call-site attribution for log entries
//!
//! Emit methods are `#[track_caller]`, so the location handed in here is
//! already the first caller outside the logger. A non-zero skip walks the
//! captured backtrace further up, counting only frames with a source location.

use std::backtrace::Backtrace;
use std::panic::Location;

/// Short `dir/file.rs:line` form of the caller, `skip` frames up
pub(crate) fn resolve(location: &Location<'_>, skip: usize) -> String {
    if skip == 0 {
        return short(location.file(), location.line());
    }

    let rendered = Backtrace::force_capture().to_string();
    let frames = frame_locations(&rendered);

    frames
        .iter()
        .position(|(file, line)| same_file(file, location.file()) && *line == location.line())
        .and_then(|start| frames.get(start + skip))
        .map(|(file, line)| short(file, *line))
        .unwrap_or_else(|| short(location.file(), location.line()))
}

/// Extract `(file, line)` pairs from a rendered std backtrace
fn frame_locations(rendered: &str) -> Vec<(String, u32)> {
    rendered
        .lines()
        .filter_map(|line| {
            let location = line.trim_start().strip_prefix("at ")?;
            let mut parts = location.rsplitn(3, ':');
            let _column = parts.next()?;
            let line = parts.next()?.parse().ok()?;
            let file = parts.next()?;
            Some((file.to_string(), line))
        })
        .collect()
}

fn same_file(frame_file: &str, location_file: &str) -> bool {
    let frame_file = frame_file.replace('\\', "/");
    let location_file = location_file.replace('\\', "/");
    frame_file.ends_with(location_file.trim_start_matches("./"))
}

/// Keep the last directory and the file name
pub(crate) fn short(file: &str, line: u32) -> String {
    let normalized = file.replace('\\', "/");
    let mut components = normalized.rsplit('/').filter(|c| !c.is_empty() && *c != ".");
    let name = components.next().unwrap_or("");
    match components.next() {
        Some(dir) => format!("{}/{}:{}", dir, name, line),
        None => format!("{}:{}", name, line),
    }
}
