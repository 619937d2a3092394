//! Output formatting for route, spanning tree, distance, and simulation results.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use droneroute_lib::{
    NetworkEdge, NodeId, NodeRole, RouteAlgorithm, RouteRenderMode, RouteStep, RouteSummary,
    VisitCounts, Weight,
};

use crate::terminal::{battery_gauge, format_with_separators, supports_unicode, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Minimal, script-friendly lines.
    Basic,
    /// Coloured listing with role badges and battery gauges.
    Enhanced,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Whether the banner and footer belong around this format.
    pub fn is_decorated(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Enhanced)
    }

    pub fn render_route(self, summary: &RouteSummary) -> io::Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Basic => print!("{}", summary.render(RouteRenderMode::Canonical)),
            OutputFormat::Enhanced => {
                let renderer = EnhancedRenderer::new(ColorPalette::detect(), supports_unicode());
                print!("{}", renderer.render(summary));
            }
            OutputFormat::Json => render_json(summary)?,
        }
        Ok(())
    }

    pub fn render_spanning(self, report: &SpanningReport) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(report),
            OutputFormat::Basic => {
                print!("{}", report.to_basic());
                Ok(())
            }
            OutputFormat::Text | OutputFormat::Enhanced => {
                print!("{}", report.to_text());
                Ok(())
            }
        }
    }

    pub fn render_distances(self, report: &DistanceReport) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(report),
            OutputFormat::Basic => {
                print!("{}", report.to_basic());
                Ok(())
            }
            OutputFormat::Text | OutputFormat::Enhanced => {
                print!("{}", report.to_text());
                Ok(())
            }
        }
    }

    pub fn render_simulation(self, report: &SimulationReport) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(report),
            OutputFormat::Basic => {
                print!("{}", report.to_basic());
                Ok(())
            }
            OutputFormat::Text | OutputFormat::Enhanced => {
                print!("{}", report.to_text());
                Ok(())
            }
        }
    }
}

/// Print the banner shown before decorated output.
pub fn print_logo() {
    let palette = ColorPalette::detect();
    let (cyan, orange, reset) = (palette.cyan, palette.orange, palette.reset);
    if supports_unicode() {
        println!(
            "{cyan}╭──────────────────────────────╮{reset}
{cyan}│{orange}  D R O N E R O U T E         {cyan}│{reset}
{cyan}│{orange}  battery-aware delivery CLI  {cyan}│{reset}
{cyan}╰──────────────────────────────╯{reset}"
        );
    } else {
        println!(
            "{orange}+------------------------------+
|  DRONEROUTE                  |
|  battery-aware delivery CLI  |
+------------------------------+{reset}"
        );
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration) {
    let palette = ColorPalette::detect();
    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };
    println!("\n{}Completed in {}{}", palette.gray, time_str, palette.reset);
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Renderer for `--format enhanced` with role badges and battery gauges.
pub struct EnhancedRenderer {
    palette: ColorPalette,
    unicode: bool,
}

impl EnhancedRenderer {
    #[must_use]
    pub const fn new(palette: ColorPalette, unicode: bool) -> Self {
        Self { palette, unicode }
    }

    pub fn render(&self, summary: &RouteSummary) -> String {
        let p = &self.palette;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Route from {}{}{} to {}{}{} ({} hops, {}):",
            p.white_bold,
            summary.start.id,
            p.reset,
            p.white_bold,
            summary.goal.id,
            p.reset,
            summary.hops,
            summary.algorithm
        );

        let len = summary.steps.len();
        for (i, step) in summary.steps.iter().enumerate() {
            let (tag_color, tag_text) = self.step_tag(step, i == 0, i + 1 == len);
            match step.hop_cost {
                Some(cost) => {
                    let _ = writeln!(
                        out,
                        "{}{}{} {}{}{} (+{})",
                        tag_color, tag_text, p.reset, p.white_bold, step.id, p.reset, cost
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "{}{}{} {}{}{}",
                        tag_color, tag_text, p.reset, p.white_bold, step.id, p.reset
                    );
                }
            }
            if let Some(battery) = step.segment_battery {
                let bar = if self.unicode { '│' } else { '|' };
                let _ = writeln!(
                    out,
                    "       {}{}{} {}{}{} {}/{}",
                    p.gray,
                    bar,
                    p.reset,
                    p.battery_level(battery, summary.max_battery),
                    battery_gauge(battery, summary.max_battery, 10, self.unicode),
                    p.reset,
                    battery,
                    summary.max_battery
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {}Total cost:{}  {}{}{}",
            p.cyan,
            p.reset,
            p.white_bold,
            format_with_separators(summary.cost),
            p.reset
        );
        if !summary.battery_enforced {
            let _ = writeln!(
                out,
                "  {}Battery ceiling not enforced by {}{}",
                p.orange, summary.algorithm, p.reset
            );
        }
        out
    }

    fn step_tag(&self, step: &RouteStep, is_first: bool, is_last: bool) -> (&str, &str) {
        let p = &self.palette;
        if is_first {
            return (p.tag_origin, " ORGN ");
        }
        if is_last {
            return (p.tag_goal, " GOAL ");
        }
        match step.role {
            Some(NodeRole::Recharge) => (p.tag_recharge, " RCHG "),
            Some(NodeRole::Storage) => (p.tag_storage, " STOR "),
            _ => (p.tag_client, " CLNT "),
        }
    }
}

/// Result of the `mst` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SpanningReport {
    pub edges: Vec<NetworkEdge>,
    pub total_weight: Weight,
    pub connected: bool,
    pub components: usize,
}

impl SpanningReport {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Minimum spanning tree: {} edges, total weight {}",
            self.edges.len(),
            self.total_weight
        );
        for edge in &self.edges {
            let _ = writeln!(out, " - {} <-> {} ({})", edge.a, edge.b, edge.weight);
        }
        if !self.connected {
            let _ = writeln!(
                out,
                "warning: network is disconnected; result is a spanning forest over {} components",
                self.components
            );
        }
        out
    }

    pub fn to_basic(&self) -> String {
        let mut out = String::new();
        for edge in &self.edges {
            let _ = writeln!(out, "{} {} {}", edge.a, edge.b, edge.weight);
        }
        out
    }
}

/// Shortest distance to one target; `cost` is `None` when unreachable.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistanceEntry {
    pub target: NodeId,
    pub cost: Option<Weight>,
}

/// Result of the `distances` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistanceReport {
    pub source: NodeId,
    pub distances: Vec<DistanceEntry>,
}

impl DistanceReport {
    pub fn to_text(&self) -> String {
        let width = self
            .distances
            .iter()
            .map(|entry| entry.target.chars().count())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Distances from {} (edge weights only, battery ignored):",
            self.source
        );
        for entry in &self.distances {
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                entry.target,
                format_cost(entry.cost),
                width = width
            );
        }
        out
    }

    pub fn to_basic(&self) -> String {
        let mut out = String::new();
        for entry in &self.distances {
            let _ = writeln!(out, "{} {}", entry.target, format_cost(entry.cost));
        }
        out
    }
}

fn format_cost(cost: Option<Weight>) -> String {
    cost.map_or_else(|| "∞".to_string(), |cost| cost.to_string())
}

/// An order that did not produce a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderFailure {
    pub id: String,
    pub reason: String,
}

/// A canonical route with its completion count.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteCount {
    pub route: String,
    pub count: u64,
}

/// Result of the `simulate` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimulationReport {
    pub algorithm: RouteAlgorithm,
    pub max_battery: Weight,
    pub orders: usize,
    pub delivered: u64,
    /// Summed cost of every delivered order.
    pub total_cost: Weight,
    /// Mean hops per delivered order; 0 when nothing was delivered.
    pub average_hops: f64,
    /// Mean cost per delivered order; 0 when nothing was delivered.
    pub average_cost: f64,
    pub failures: Vec<OrderFailure>,
    pub top_routes: Vec<RouteCount>,
    pub visits: VisitCounts,
    /// Frequency index contents, root first.
    pub index_preorder: Vec<RouteCount>,
}

impl SimulationReport {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Simulated {} orders with {} (max battery {}): {} delivered, {} failed",
            self.orders,
            self.algorithm,
            self.max_battery,
            self.delivered,
            self.failures.len()
        );
        let _ = writeln!(
            out,
            "Total cost {}, average {:.2} per delivery over {:.2} hops",
            format_with_separators(self.total_cost),
            self.average_cost,
            self.average_hops
        );
        for failure in &self.failures {
            let _ = writeln!(out, "  {}: {}", failure.id, failure.reason);
        }

        let _ = writeln!(out, "\nMost frequent routes:");
        for entry in &self.top_routes {
            let _ = writeln!(out, "  {:>4}  {}", entry.count, entry.route);
        }

        let _ = writeln!(out, "\nVisits by role:");
        for (label, bucket) in [
            ("storage", &self.visits.storage),
            ("recharge", &self.visits.recharge),
            ("client", &self.visits.clients),
        ] {
            let joined = bucket
                .iter()
                .map(|(id, count)| format!("{id}={count}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "  {label}: {joined}");
        }

        let _ = writeln!(out, "\nFrequency index (preorder):");
        for entry in &self.index_preorder {
            let _ = writeln!(out, "  {} ({})", entry.route, entry.count);
        }
        out
    }

    pub fn to_basic(&self) -> String {
        let mut out = String::new();
        for entry in &self.top_routes {
            let _ = writeln!(out, "{}\t{}", entry.count, entry.route);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_summary, visits};

    #[test]
    fn enhanced_plain_palette_has_no_escapes() {
        let renderer = EnhancedRenderer::new(ColorPalette::plain(), false);
        let text = renderer.render(&sample_summary());
        assert!(!text.contains('\x1b'));
        assert!(text.starts_with("Route from A to C (2 hops, bfs):"));
        assert!(text.contains(" ORGN  A"));
        assert!(text.contains(" RCHG  B (+5)"));
        assert!(text.contains(" GOAL  C (+40)"));
        assert!(text.contains("[#########.] 45/50"));
    }

    #[test]
    fn enhanced_colours_battery_gauge() {
        let renderer = EnhancedRenderer::new(ColorPalette::colored(), true);
        let text = renderer.render(&sample_summary());
        assert!(text.contains("\x1b[31m[█████████░]"));
    }

    #[test]
    fn spanning_text_warns_on_forest() {
        let report = SpanningReport {
            edges: vec![NetworkEdge {
                a: "A".into(),
                b: "B".into(),
                weight: 2,
            }],
            total_weight: 2,
            connected: false,
            components: 2,
        };
        let text = report.to_text();
        assert!(text.contains(" - A <-> B (2)"));
        assert!(text.contains("spanning forest over 2 components"));
        assert_eq!(report.to_basic(), "A B 2\n");
    }

    #[test]
    fn distances_show_infinity() {
        let report = DistanceReport {
            source: "A".into(),
            distances: vec![
                DistanceEntry {
                    target: "A".into(),
                    cost: Some(0),
                },
                DistanceEntry {
                    target: "Z".into(),
                    cost: None,
                },
            ],
        };
        assert_eq!(report.to_basic(), "A 0\nZ ∞\n");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["distances"][1]["cost"].is_null());
    }

    #[test]
    fn simulation_text_lists_sections() {
        let report = SimulationReport {
            algorithm: RouteAlgorithm::Dijkstra,
            max_battery: 50,
            orders: 2,
            delivered: 1,
            total_cost: 1250,
            average_hops: 1.0,
            average_cost: 1250.0,
            failures: vec![OrderFailure {
                id: "O2".into(),
                reason: "no feasible route".into(),
            }],
            top_routes: vec![RouteCount {
                route: "E → A".into(),
                count: 1,
            }],
            visits: visits(),
            index_preorder: vec![RouteCount {
                route: "E → A".into(),
                count: 1,
            }],
        };
        let text = report.to_text();
        assert!(text.starts_with("Simulated 2 orders with dijkstra (max battery 50): 1 delivered, 1 failed"));
        assert!(text.contains("Total cost 1,250, average 1250.00 per delivery over 1.00 hops"));
        assert!(text.contains("  O2: no feasible route"));
        assert!(text.contains("storage: A=1"));
        assert!(text.contains("recharge: B=1"));
        assert!(text.contains("client: C=1"));
        assert_eq!(report.to_basic(), "1\tE → A\n");
    }
}
