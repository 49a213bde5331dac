use fieldflag::derive::*;
use fieldflag::{unique_prefix, Command, FlagParser};

#[derive(Debug, Default, FlagRecord)]
struct Globals {
    #[flag(short, usage = "Print more output.")]
    verbose: bool,
    #[flag(usage = "The repository root.", env = "REPO_ROOT", default = ".")]
    root: String,
}

#[derive(Debug, Default, FlagRecord)]
struct CloneFlags {
    #[flag(usage = "Create a shallow clone with this many commits.")]
    depth: u32,
    #[flag(nonflag = "URL", usage = "The repository to clone.")]
    url: String,
}

#[derive(Debug, Default, FlagRecord)]
struct LogFlags {
    #[flag(name = "n, max-count", usage = "Limit the number of commits.", default = 10)]
    max_count: usize,
    #[flag(nonflag = "PATH")]
    paths: Vec<String>,
}

fn main() {
    let mut globals = Globals::default();
    let parser = FlagParser::new("repo_tool")
        .command(
            Command::new("clone", "Clone a repository.").run_with_globals(
                |globals: &Globals, invocation| {
                    let mut clone = CloneFlags::default();
                    invocation.parse(&mut clone)?;
                    println!("Cloning {} into {} (depth {}).", clone.url, globals.root, clone.depth);
                    Ok(())
                },
            ),
        )
        .command(Command::new("log", "Show the commit history.").run(|invocation| {
            let mut log = LogFlags::default();
            invocation.parse(&mut log)?;
            println!("Showing {} commits of {:?}.", log.max_count, log.paths);
            Ok(())
        }))
        .command(Command::new("status", "Show the working tree status.").run_with_globals(
            |globals: &Globals, invocation| {
                invocation.parse(&mut ())?;

                if globals.verbose {
                    println!("Status of {}:", globals.root);
                }

                println!("Nothing to commit.");
                Ok(())
            },
        ))
        .resolver(unique_prefix)
        .usage(|usage| format!("A toy repository tool.\n\n{usage}"));

    parser.run_env(Some(&mut globals));
}
