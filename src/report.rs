use sanskrit_morph::{AnalysisVerbose, Morphology, Pada};
use serde::Serialize;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(path: &[Pada], run: &AnalysisVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let split: Vec<&str> = path.iter().map(|p| p.surface.as_str()).collect();
    println!("\n{}", palette.bold(palette.paint(format!("Lexical split: {}", split.join(" ")), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
    for pada in path {
        let count = palette.dim(format!("({})", pada.candidates.len()));
        println!("  {} {}", palette.paint(&pada.surface, ansi::BLUE), count);
        for candidate in &pada.candidates {
            println!("    {}", palette.dim(candidate.to_string()));
        }
    }

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    let morphologies = &run.analysis.morphologies;
    if morphologies.is_empty() {
        println!("  {}", palette.paint("No valid morphologies for this split", ansi::YELLOW));
    } else {
        println!("  {}", palette.bold("Valid morphologies"));
        for (idx, morph) in morphologies.iter().enumerate() {
            println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), fmt_morphology(morph, &palette));
        }
    }

    let metrics = &run.details.metrics;
    println!("\n{}", palette.paint("━━━ Search ━━━", ansi::GRAY));
    println!(
        "  Space: {}  │  Nodes: {}  │  Checks: {}  │  Prunes: {}  │  Backtracks: {}",
        palette.paint(metrics.search_space.to_string(), ansi::BLUE),
        palette.paint(metrics.stats.nodes.to_string(), ansi::YELLOW),
        palette.paint(metrics.stats.checks.to_string(), ansi::YELLOW),
        palette.paint(metrics.stats.prunes.to_string(), ansi::YELLOW),
        palette.paint(metrics.stats.backtracks.to_string(), ansi::YELLOW),
    );
    println!("  {} {}", palette.dim("rules:"), palette.paint(run.details.active_rules.join(", "), ansi::CYAN));

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Build: {}  │  Search: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", metrics.build), ansi::CYAN),
        palette.dim(format!("{:?}", metrics.search)),
    );
    println!();
}

fn fmt_morphology(morph: &Morphology, palette: &ansi::Palette) -> String {
    morph
        .iter()
        .map(|a| {
            format!(
                "({}, {})",
                palette.bold(palette.paint(&a.surface, ansi::GREEN)),
                palette.paint(a.candidate.to_string(), ansi::BLUE)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Serialize)]
struct SplitReport<'a> {
    split: Vec<&'a str>,
    valid: bool,
    morphologies: &'a [Morphology],
    solutions: usize,
    nodes: u64,
    elapsed_us: u128,
}

/// One JSON object per split, in input order.
pub fn to_json(paths: &[Vec<Pada>], runs: &[AnalysisVerbose]) -> serde_json::Result<String> {
    let reports: Vec<SplitReport<'_>> = paths
        .iter()
        .zip(runs)
        .map(|(path, run)| SplitReport {
            split: path.iter().map(|p| p.surface.as_str()).collect(),
            valid: run.analysis.is_valid(),
            morphologies: &run.analysis.morphologies,
            solutions: run.details.metrics.stats.solutions,
            nodes: run.details.metrics.stats.nodes,
            elapsed_us: run.details.metrics.total.as_micros(),
        })
        .collect();
    serde_json::to_string_pretty(&reports)
}
