use atomos::{registered_processors, Atoms, Processor};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
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

pub fn print_run(input: &str, atoms: &mut Atoms, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Atomizing: \"{input}\""), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Scores ━━━", ansi::GRAY));
    print_scores(input, atoms, &palette);

    println!("\n{}", palette.paint("━━━ Atoms ━━━", ansi::GRAY));
    print_atoms(atoms, &palette);

    println!("\n{}", palette.paint("━━━ Derivable ━━━", ansi::GRAY));
    print_derivable(atoms, &palette);
    println!();
}

fn print_scores(input: &str, atoms: &mut Atoms, palette: &ansi::Palette) {
    let selected = atoms.processor().kind();
    for processor in registered_processors() {
        let marker = if processor.kind() == selected {
            palette.paint("▶", ansi::GREEN)
        } else {
            " ".to_string()
        };
        let cell = match processor.score(input) {
            Some(score) => palette.paint(
                format!(
                    "coverage={:.3}  confidence={:.3}  rank={:.3}",
                    score.coverage,
                    score.confidence,
                    score.rank()
                ),
                ansi::BLUE,
            ),
            None => palette.dim("no match"),
        };
        println!("  {marker} {:<10} {cell}", processor.kind().name());
    }
    println!(
        "\n  {} {} {}",
        palette.paint("Selected:", ansi::BLUE),
        palette.bold(selected.name()),
        palette.dim(format!("canonical \"{}\"", atoms.value()))
    );
}

fn print_atoms(atoms: &mut Atoms, palette: &ansi::Palette) {
    for (name, value) in atoms.data().clone() {
        match value {
            Some(value) => {
                println!("  {:<14} {}", name, palette.paint(format!("\"{value}\""), ansi::GREEN))
            }
            None => println!("  {:<14} {}", name, palette.dim("∅")),
        }
    }
}

fn print_derivable(atoms: &mut Atoms, palette: &ansi::Palette) {
    let realized = atoms.current_atoms();
    let derivable: Vec<String> =
        atoms.available_atoms().into_iter().filter(|name| !realized.contains(name)).collect();
    if derivable.is_empty() {
        println!("{}", palette.dim("  nothing beyond the realized atoms"));
    } else {
        println!("  {}", palette.dim(derivable.join("  ")));
    }
}
