//! Scripted demo driver
//!
//! Plays the professor panel the way the score-app renders it, so the
//! binary exercises the full suite without a live deployment.
//!
//! TODO: add a WebDriver-backed `UiDriver` and select it from the CLI once
//! the staging deployment exposes a driver endpoint.

use driver_bridge::{PageSnapshot, StubDriver, StubFrame};
use panelprobe_core_types::Destination;

use crate::config::HarnessConfig;

pub fn demo_panel_driver(config: &HarnessConfig) -> StubDriver {
    let destination = config
        .resolve_plan()
        .effective_candidates()
        .into_iter()
        .next()
        .unwrap_or_else(|| Destination::new(config.base_url.clone()));
    let url = destination.as_str().to_string();

    let panel = panel_snapshot(&url);
    let menu = panel
        .clone()
        .with_text("Live grades (CSV)")
        .with_text("Live grades (summary)");
    let modal = panel
        .clone()
        .with_text("Score Grid — Topics × Teams")
        .with_button("Close");
    let teams = panel.clone().with_input("Filter teams…");

    StubDriver::new()
        .with_page(url, StubFrame::loading_then(2, panel.clone()))
        .with_click_effect("Export", vec![StubFrame::Snapshot(menu)])
        .with_click_effect("Open scores grid", StubFrame::loading_then(1, modal))
        .with_click_effect("Close", vec![StubFrame::Snapshot(panel.clone())])
        .with_click_effect("teams", StubFrame::loading_then(1, teams))
}

fn panel_snapshot(url: &str) -> PageSnapshot {
    PageSnapshot::new(url, "Score App")
        .with_heading("Hello, professor")
        .with_nav_item("dashboard")
        .with_nav_item("teams")
        .with_nav_item("team")
        .with_nav_item("Performance Benchmarks")
        .with_button("Export")
        .with_button("Open scores grid")
        .with_table_header("Rank")
        .with_table_header("Team")
        .with_table_header("Final")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn demo_scripts_the_first_candidate() {
        let config = HarnessConfig::try_parse_from(["panelprobe"]).unwrap();
        let driver = demo_panel_driver(&config);
        assert_eq!(driver.navigations().len(), 0);
    }
}
