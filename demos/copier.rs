use fieldflag::derive::*;

#[derive(Debug, Default, FlagRecord)]
#[flag(program = "copier")]
struct Flags {
    #[flag(short, usage = "Print each copied file.")]
    verbose: bool,
    #[flag(name = "j, jobs", usage = "The number of parallel copies.", env = "COPIER_JOBS", default = 4)]
    jobs: u8,
    #[flag(nonflag, usage = "The file to copy.")]
    source: String,
    #[flag(nonflag = "DEST", usage = "The locations to copy into.")]
    destinations: Vec<String>,
    #[flag(skip)]
    copied: usize,
}

fn main() {
    let mut flags = Flags::parse_flags();

    for destination in &flags.destinations {
        if flags.verbose {
            println!("{} -> {destination}", flags.source);
        }

        flags.copied += 1;
    }

    println!("Copied {} times with {} jobs.", flags.copied, flags.jobs);
}
