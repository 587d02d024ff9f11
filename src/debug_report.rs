use headword::{DescentStep, FocusCheck, NodeId, ParseTree, QuestionAnalysis, Screening};

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

pub fn print_run(tree: &ParseTree, analysis: &QuestionAnalysis, focus: Option<&FocusCheck>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Question: \"{}\"", analysis.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Screening ━━━", ansi::GRAY));
    let screening = match analysis.screening {
        Screening::ApplyRules => palette.paint("head rules applied", ansi::BLUE),
        Screening::Implicit(id) => palette.paint(format!("implicit headword {}", fmt_node(tree, id)), ansi::GREEN),
        Screening::TooShort => palette.dim("too short for a headword"),
    };
    println!("  {}", screening);

    if !analysis.steps.is_empty() {
        println!("\n{}", palette.paint("━━━ Descent ━━━", ansi::GRAY));
        print_steps(tree, &analysis.steps, &palette);
    }

    println!("\n{}", palette.paint("━━━ Headword ━━━", ansi::GRAY));
    match (&analysis.headword, &analysis.headword_text) {
        (Some(headword), Some(text)) => {
            println!(
                "  {} {} {}",
                palette.bold(palette.paint(text, ansi::GREEN)),
                palette.dim("│"),
                palette.paint(format!("span {}..{}", headword.span.start, headword.span.end), ansi::YELLOW),
            );
            println!(
                "      {} {}",
                palette.dim("source:"),
                palette.paint(format!("{:?}", headword.source), ansi::BLUE)
            );
        }
        _ => {
            println!("{}", palette.dim("  No headword"));
            if analysis.screening == Screening::ApplyRules && analysis.steps.is_empty() {
                let tip = "  Tip: pass --trace or set HEADWORD_LOG=debug to see why the rules stopped";
                println!("\n{}", palette.dim(tip));
            }
        }
    }

    if let Some(focus) = focus {
        println!("\n{}", palette.paint("━━━ Focus ━━━", ansi::GRAY));
        let line = match focus {
            FocusCheck::Agree => palette.paint("agrees with the headword", ansi::GREEN),
            FocusCheck::BothMissing => palette.dim("neither focus nor headword"),
            FocusCheck::Disagree { focus, headword } => palette.paint(
                format!(
                    "focus {} != headword {}",
                    focus.as_deref().unwrap_or("<none>"),
                    headword.as_deref().unwrap_or("<none>")
                ),
                ansi::YELLOW,
            ),
        };
        println!("  {}", line);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Iterations: {}",
        palette.paint(format!("{:?}", analysis.elapsed), ansi::GREEN),
        palette.paint(analysis.iterations.to_string(), ansi::CYAN),
    );
    println!();
}

fn print_steps(tree: &ParseTree, steps: &[DescentStep], palette: &ansi::Palette) {
    for (idx, step) in steps.iter().enumerate() {
        let line = match step {
            DescentStep::Override { rule, from, to } => format!(
                "{} {} -> {}",
                palette.paint(format!("{:?}", rule), ansi::YELLOW),
                fmt_node(tree, *from),
                fmt_node(tree, *to)
            ),
            DescentStep::Rule { from, to } => {
                format!("{} {} -> {}", palette.paint("rule", ansi::BLUE), fmt_node(tree, *from), fmt_node(tree, *to))
            }
            DescentStep::PostFix { token, target } => format!(
                "{} {} -> {}",
                palette.paint("post-fix", ansi::YELLOW),
                fmt_node(tree, *token),
                fmt_node(tree, *target)
            ),
            DescentStep::PostFixRejected { token, target } => format!(
                "{} {} -> {} {}",
                palette.paint("post-fix", ansi::YELLOW),
                fmt_node(tree, *token),
                fmt_node(tree, *target),
                palette.dim("(already visited)")
            ),
            DescentStep::Abort(err) => palette.dim(format!("stop: {}", err)),
            DescentStep::Resolved(token) => {
                format!("{} {}", palette.paint("resolved", ansi::GREEN), fmt_node(tree, *token))
            }
        };
        println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), line);
    }
}

fn fmt_node(tree: &ParseTree, id: NodeId) -> String {
    let text: String = tree.text_of(id).chars().take(60).collect();
    format!("{} [{}]", tree.label(id), text)
}
