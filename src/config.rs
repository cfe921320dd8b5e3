//! Harness configuration
//!
//! All knobs come from the CLI with environment fallbacks. The candidate
//! route list is derived from the base URL; a pinned panel URL bypasses
//! probing entirely.

use std::time::Duration;

use clap::Parser;
use panelprobe_core_types::Destination;
use route_resolver::ResolvePlan;

/// In-app paths the professor panel is known to live at across
/// deployments, probed in this order.
const CANDIDATE_PATHS: [&str; 6] = [
    "/#/professor-panel",
    "/professor-panel",
    "/professor",
    "/panel",
    "/#/panel",
    "/#/professor",
];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "panelprobe",
    version,
    about = "Browser-driven acceptance harness for the professor panel screen"
)]
pub struct HarnessConfig {
    /// Base URL the application is served from
    #[arg(
        long,
        env = "PANELPROBE_BASE_URL",
        default_value = "http://localhost:3000"
    )]
    pub base_url: String,

    /// Pin resolution to one known-good panel URL, bypassing candidate
    /// probing
    #[arg(long, env = "PANELPROBE_PANEL_URL")]
    pub panel_url: Option<String>,

    /// Ceiling on each bounded wait
    #[arg(long, value_parser = humantime::parse_duration, default_value = "8s")]
    pub wait_ceiling: Duration,

    /// Spacing between UI state probes (must be above zero)
    #[arg(long, value_parser = parse_poll_interval, default_value = "250ms")]
    pub poll_interval: Duration,

    /// Also print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl HarnessConfig {
    /// Candidate destinations derived from the base URL, in probe order.
    pub fn candidate_destinations(&self) -> Vec<Destination> {
        let base = self.base_url.trim_end_matches('/');
        CANDIDATE_PATHS
            .iter()
            .map(|path| Destination::new(format!("{base}{path}")))
            .collect()
    }

    /// Resolution plan: the candidate list, pinned to the panel URL when
    /// one was supplied and non-blank.
    pub fn resolve_plan(&self) -> ResolvePlan {
        let plan = ResolvePlan::new(self.candidate_destinations());
        match self.panel_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => plan.with_override(Destination::new(url)),
            _ => plan,
        }
    }
}

fn parse_poll_interval(raw: &str) -> Result<Duration, String> {
    let parsed = humantime::parse_duration(raw).map_err(|err| err.to_string())?;
    if parsed.is_zero() {
        return Err("poll interval must be above zero".into());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> HarnessConfig {
        HarnessConfig::try_parse_from(
            std::iter::once("panelprobe").chain(args.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn candidates_follow_the_known_deployment_paths() {
        let config = parse(&["--base-url", "http://localhost:5173/"]);
        let candidates = config.candidate_destinations();
        assert_eq!(candidates.len(), 6);
        assert_eq!(
            candidates[0].as_str(),
            "http://localhost:5173/#/professor-panel"
        );
        assert_eq!(candidates[5].as_str(), "http://localhost:5173/#/professor");
    }

    #[test]
    fn pinned_panel_url_overrides_the_plan() {
        let config = parse(&["--panel-url", "http://localhost:5173/#/professor-panel"]);
        let plan = config.resolve_plan();
        assert_eq!(plan.effective_candidates().len(), 1);
    }

    #[test]
    fn blank_panel_url_is_ignored() {
        let config = parse(&["--panel-url", "   "]);
        let plan = config.resolve_plan();
        assert_eq!(plan.effective_candidates().len(), 6);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let result = HarnessConfig::try_parse_from(["panelprobe", "--poll-interval", "0ms"]);
        assert!(result.is_err());
    }

    #[test]
    fn durations_parse_human_style() {
        let config = parse(&["--wait-ceiling", "2s", "--poll-interval", "50ms"]);
        assert_eq!(config.wait_ceiling, Duration::from_secs(2));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
    }
}
